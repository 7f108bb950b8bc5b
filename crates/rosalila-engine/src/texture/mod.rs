//! Texture loading and ownership.
//!
//! Images are decoded on the CPU ([`decode_image`]), expanded to RGBA8 and
//! uploaded as single-mip, linearly filtered 2D textures. Uploaded textures
//! live in a [`TextureTable`] owned by the graphics facade and are addressed
//! by [`TextureId`].

mod decode;
mod gpu;
mod table;

pub use decode::{decode_image, ChannelLayout, DecodedImage};
pub use gpu::Texture;
pub use table::{TextureId, TextureTable};
