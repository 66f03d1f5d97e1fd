pub mod labor_lines;
