//! Colorspace tags and plane layout.
//!
//! A [`Colorspace`] is a pixel type plus a per-component bit depth. The pixel
//! type decides which planes a frame carries and in which order they are
//! visited; the bit depth decides how many bytes a sample occupies.

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

/// Chroma subsampling of planar YUV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChromaSubsampling {
    Cs444,
    Cs422,
    Cs420,
    Cs411,
}

impl ChromaSubsampling {
    /// Horizontal log2 subsampling factor.
    pub fn shift_x(self) -> u32 {
        match self {
            Self::Cs444 => 0,
            Self::Cs422 | Self::Cs420 => 1,
            Self::Cs411 => 2,
        }
    }

    /// Vertical log2 subsampling factor.
    pub fn shift_y(self) -> u32 {
        match self {
            Self::Cs420 => 1,
            Self::Cs444 | Self::Cs422 | Self::Cs411 => 0,
        }
    }
}

/// Pixel type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelType {
    /// Planar YUV, optionally with an alpha plane.
    Yuv {
        subsampling: ChromaSubsampling,
        alpha: bool,
    },
    /// Luma only.
    Y,
    /// Planar RGB, optionally with an alpha plane.
    PlanarRgb { alpha: bool },
    /// Interleaved BGR(A). Rows are stored bottom-up.
    PackedRgb { alpha: bool },
    /// Interleaved 4:2:2 YUV.
    Yuy2,
}

/// Plane identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaneId {
    Y,
    U,
    V,
    A,
    G,
    B,
    R,
    /// The single plane of an interleaved format.
    Packed,
}

impl PlaneId {
    /// Whether the plane carries color difference samples.
    pub fn is_chroma(self) -> bool {
        matches!(self, PlaneId::U | PlaneId::V)
    }
}

const PLANES_YUV: [PlaneId; 4] = [PlaneId::Y, PlaneId::U, PlaneId::V, PlaneId::A];
const PLANES_RGB: [PlaneId; 4] = [PlaneId::G, PlaneId::B, PlaneId::R, PlaneId::A];
const PLANES_PACKED: [PlaneId; 1] = [PlaneId::Packed];

/// Pixel type plus bit depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Colorspace {
    pub pixel_type: PixelType,
    /// Bits per component: 8, 10, 12, 14, 16 or 32 (float).
    pub bits_per_component: u8,
}

impl Colorspace {
    pub const YV12: Self = Self::new_unchecked(
        PixelType::Yuv {
            subsampling: ChromaSubsampling::Cs420,
            alpha: false,
        },
        8,
    );
    pub const YV16: Self = Self::new_unchecked(
        PixelType::Yuv {
            subsampling: ChromaSubsampling::Cs422,
            alpha: false,
        },
        8,
    );
    pub const YV24: Self = Self::new_unchecked(
        PixelType::Yuv {
            subsampling: ChromaSubsampling::Cs444,
            alpha: false,
        },
        8,
    );
    pub const Y8: Self = Self::new_unchecked(PixelType::Y, 8);
    pub const YUY2: Self = Self::new_unchecked(PixelType::Yuy2, 8);
    pub const RGB24: Self = Self::new_unchecked(PixelType::PackedRgb { alpha: false }, 8);
    pub const RGB32: Self = Self::new_unchecked(PixelType::PackedRgb { alpha: true }, 8);
    pub const RGB48: Self = Self::new_unchecked(PixelType::PackedRgb { alpha: false }, 16);
    pub const RGB64: Self = Self::new_unchecked(PixelType::PackedRgb { alpha: true }, 16);
    pub const RGBP: Self = Self::new_unchecked(PixelType::PlanarRgb { alpha: false }, 8);
    pub const RGBAP: Self = Self::new_unchecked(PixelType::PlanarRgb { alpha: true }, 8);

    const fn new_unchecked(pixel_type: PixelType, bits_per_component: u8) -> Self {
        Self {
            pixel_type,
            bits_per_component,
        }
    }

    /// Create a colorspace, rejecting bit depths the pixel type cannot carry.
    pub fn new(pixel_type: PixelType, bits_per_component: u8) -> Result<Self> {
        let valid = match pixel_type {
            PixelType::Yuy2 => bits_per_component == 8,
            PixelType::PackedRgb { .. } => matches!(bits_per_component, 8 | 16),
            _ => matches!(bits_per_component, 8 | 10 | 12 | 14 | 16 | 32),
        };
        if !valid {
            return Err(GraphError::Config(format!(
                "{bits_per_component}-bit samples are not supported for {pixel_type:?}"
            )));
        }
        Ok(Self::new_unchecked(pixel_type, bits_per_component))
    }

    /// Interleaved RGB, the only bottom-up storage.
    pub fn is_packed_rgb(&self) -> bool {
        matches!(self.pixel_type, PixelType::PackedRgb { .. })
    }

    /// Whether samples are 32-bit floats.
    pub fn is_float(&self) -> bool {
        self.bits_per_component == 32
    }

    /// Number of color components, alpha included.
    pub fn num_components(&self) -> usize {
        match self.pixel_type {
            PixelType::Y => 1,
            PixelType::Yuy2 => 3,
            PixelType::Yuv { alpha, .. }
            | PixelType::PlanarRgb { alpha }
            | PixelType::PackedRgb { alpha } => {
                if alpha {
                    4
                } else {
                    3
                }
            }
        }
    }

    /// Planes in family order. Interleaved formats have a single plane.
    pub fn planes(&self) -> &'static [PlaneId] {
        match self.pixel_type {
            PixelType::PackedRgb { .. } | PixelType::Yuy2 => &PLANES_PACKED,
            PixelType::Y => &PLANES_YUV[..1],
            PixelType::Yuv { .. } => &PLANES_YUV[..self.num_components()],
            PixelType::PlanarRgb { .. } => &PLANES_RGB[..self.num_components()],
        }
    }

    pub fn bytes_per_component(&self) -> usize {
        match self.bits_per_component {
            8 => 1,
            32 => 4,
            _ => 2,
        }
    }

    /// Bytes one pixel occupies in the given plane.
    pub fn bytes_per_pixel(&self, plane: PlaneId) -> usize {
        match (self.pixel_type, plane) {
            (PixelType::Yuy2, _) => 2,
            (PixelType::PackedRgb { .. }, _) => self.num_components() * self.bytes_per_component(),
            _ => self.bytes_per_component(),
        }
    }

    /// Plane width in pixels for a frame `width` pixels wide.
    pub fn plane_width(&self, plane: PlaneId, width: u32) -> u32 {
        match (self.pixel_type, plane) {
            (PixelType::Yuv { subsampling, .. }, PlaneId::U | PlaneId::V) => {
                width >> subsampling.shift_x()
            }
            _ => width,
        }
    }

    /// Plane height in rows for a frame `height` rows tall.
    pub fn plane_height(&self, plane: PlaneId, height: u32) -> u32 {
        match (self.pixel_type, plane) {
            (PixelType::Yuv { subsampling, .. }, PlaneId::U | PlaneId::V) => {
                height >> subsampling.shift_y()
            }
            _ => height,
        }
    }

    /// Bytes needed to hold `pixels` pixels of the given plane.
    pub fn bytes_from_pixels(&self, plane: PlaneId, pixels: u32) -> usize {
        pixels as usize * self.bytes_per_pixel(plane)
    }

    /// Same pixel type, component count and bit depth.
    pub fn is_same_colorspace(&self, other: &Colorspace) -> bool {
        self.pixel_type == other.pixel_type
            && self.num_components() == other.num_components()
            && self.bits_per_component == other.bits_per_component
    }
}
