pub mod condition;
pub mod location;
pub mod observation;
pub mod record;
