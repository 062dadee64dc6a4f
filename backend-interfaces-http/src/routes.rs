pub mod v1;

pub use v1::build_router;
