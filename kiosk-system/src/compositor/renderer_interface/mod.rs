pub mod abstraction;

pub use abstraction::{RenderableTexture, Renderer, RendererError, SurfaceTextureImporter, TextureImporter};
