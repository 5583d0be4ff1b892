mod codec;
mod discovery;
mod types;
mod worker;

pub use codec::HeifJpegCodec;
pub use types::ProgressMessage;
pub use worker::spawn;
