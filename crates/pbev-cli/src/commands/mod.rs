pub mod extract;
pub mod legend;
pub mod rows;
pub mod schema;
