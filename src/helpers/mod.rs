mod load_dotenv;
mod time;

pub use load_dotenv::load_dotenv;
pub use time::{iso_millis, now_utc};

pub mod shutdown;
