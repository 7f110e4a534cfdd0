#![doc = r#"
The Standard MIDI File header and its timing division
"#]

mod header;
pub use header::*;

mod timing;
pub use timing::*;
