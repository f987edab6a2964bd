pub mod cell;
pub mod record;
pub mod result;
pub mod schema;
pub mod table;
pub mod upload;
