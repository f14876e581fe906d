// error module
mod error;
// offer CSV generator
mod offers;

pub use error::FixtureError;
pub use offers::render_offers_csv;
