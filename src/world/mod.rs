mod camera;
mod geometry;
mod intersect;
mod texture;

pub use geometry::{Scene, SceneError, Tile, TileId, Wall};

pub use camera::Camera;

pub use intersect::{
    Contact, RayHit, SlabHit, collide_thick_segment, ray_cast_segment,
};

pub use texture::{SurfaceTextures, Texture, TextureError};
