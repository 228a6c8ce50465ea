/// RenderTarget trait, render target descriptor, format and usage flags

use bitflags::bitflags;

/// Pixel format of a probe render target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    R8G8B8A8_UNORM,
    R11G11B10_UFLOAT,
    R16G16B16A16_SFLOAT,
    R32G32B32A32_SFLOAT,
}

/// Shape of a probe render target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureDimension {
    /// Single 2D image (planar reflections)
    Tex2D,
    /// Six-face cubemap (reflection probes)
    Cube,
}

bitflags! {
    /// How a render target will be used by the backend
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RenderTargetUsage: u32 {
        /// Can be bound as a color attachment
        const RENDER_TARGET = 1 << 0;
        /// Can be sampled in shaders
        const SAMPLED = 1 << 1;
        /// Mip chain is generated after capture (convolution input)
        const GENERATE_MIPS = 1 << 2;
    }
}

/// Descriptor for creating a probe render target
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTargetDesc {
    /// Debug name (e.g. "probe_realtime_cube")
    pub name: String,
    /// 2D or cubemap
    pub dimension: TextureDimension,
    /// Width and height in pixels (targets are always square)
    pub size: u32,
    /// Pixel format
    pub format: TextureFormat,
    /// Number of mip levels (1 = no mip chain)
    pub mip_levels: u32,
    /// Usage flags
    pub usage: RenderTargetUsage,
}

impl RenderTargetDesc {
    /// Number of mip levels of a full chain down to 1x1
    pub fn full_mip_chain(size: u32) -> u32 {
        32 - size.max(1).leading_zeros()
    }

    /// Number of array layers the backend must allocate
    pub fn layer_count(&self) -> u32 {
        match self.dimension {
            TextureDimension::Tex2D => 1,
            TextureDimension::Cube => 6,
        }
    }
}

/// Render target trait
///
/// Implemented by backend-specific texture types. The probe owns its
/// targets through `Arc<dyn RenderTarget>`; the GPU resource is released
/// when the last reference is dropped.
pub trait RenderTarget: Send + Sync {
    /// The descriptor this target was created from
    fn desc(&self) -> &RenderTargetDesc;

    /// Width of the render target in pixels
    fn width(&self) -> u32 {
        self.desc().size
    }

    /// Height of the render target in pixels
    fn height(&self) -> u32 {
        self.desc().size
    }

    /// Pixel format of the render target
    fn format(&self) -> TextureFormat {
        self.desc().format
    }

    /// 2D or cubemap
    fn dimension(&self) -> TextureDimension {
        self.desc().dimension
    }
}
