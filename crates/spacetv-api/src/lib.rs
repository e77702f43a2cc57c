// Wire-format adapters for the remote video platform.
// The remote API itself is an external collaborator; this crate only
// knows how to turn its two listing shapes into the canonical record.

mod error;
mod normalize;
pub mod schema;

pub use error::{Error, Result};
pub use normalize::{
    from_app_item, from_web_item, normalize_app_listing, normalize_web_listing,
};
