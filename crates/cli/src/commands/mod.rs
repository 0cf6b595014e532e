pub mod locate;
pub mod path;
pub mod record;
