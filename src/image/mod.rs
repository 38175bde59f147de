pub mod io;
mod rgb;

pub use self::io::RgbImageU8;
pub use self::rgb::ImageRgb8;
