use wgpu::util::DeviceExt;

use super::{LayoutError, RenderCtx};

/// Scalar component type of a vertex attribute.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ComponentType {
    F32,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
}

impl ComponentType {
    /// Size of one component in bytes.
    pub fn size(self) -> u64 {
        match self {
            ComponentType::F32 | ComponentType::I32 | ComponentType::U32 => 4,
            ComponentType::I16 | ComponentType::U16 => 2,
            ComponentType::I8 | ComponentType::U8 => 1,
        }
    }
}

/// One attribute of a vertex layout.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader location this attribute feeds.
    pub slot: u32,

    /// Component count (1–4; 8- and 16-bit types support only 2 or 4).
    pub components: u32,

    /// Scalar component type.
    pub component: ComponentType,

    /// Whether integer components are normalized to [0, 1] / [-1, 1].
    pub normalize: bool,

    /// Byte offset of this attribute within the per-vertex stride.
    pub offset: u64,
}

impl VertexAttribute {
    /// Size of the attribute in bytes.
    pub fn byte_size(&self) -> u64 {
        self.component.size() * u64::from(self.components)
    }

    /// Maps the attribute onto a backend vertex format.
    ///
    /// Combinations the backend cannot express (three-component 8/16-bit
    /// attributes, normalized floats, normalized 32-bit integers) are
    /// rejected rather than approximated.
    pub fn vertex_format(&self) -> Result<wgpu::VertexFormat, LayoutError> {
        use wgpu::VertexFormat as F;

        let format = match (self.component, self.components, self.normalize) {
            (ComponentType::F32, 1, false) => F::Float32,
            (ComponentType::F32, 2, false) => F::Float32x2,
            (ComponentType::F32, 3, false) => F::Float32x3,
            (ComponentType::F32, 4, false) => F::Float32x4,

            (ComponentType::U32, 1, false) => F::Uint32,
            (ComponentType::U32, 2, false) => F::Uint32x2,
            (ComponentType::U32, 3, false) => F::Uint32x3,
            (ComponentType::U32, 4, false) => F::Uint32x4,

            (ComponentType::I32, 1, false) => F::Sint32,
            (ComponentType::I32, 2, false) => F::Sint32x2,
            (ComponentType::I32, 3, false) => F::Sint32x3,
            (ComponentType::I32, 4, false) => F::Sint32x4,

            (ComponentType::U8, 2, false) => F::Uint8x2,
            (ComponentType::U8, 4, false) => F::Uint8x4,
            (ComponentType::U8, 2, true) => F::Unorm8x2,
            (ComponentType::U8, 4, true) => F::Unorm8x4,

            (ComponentType::I8, 2, false) => F::Sint8x2,
            (ComponentType::I8, 4, false) => F::Sint8x4,
            (ComponentType::I8, 2, true) => F::Snorm8x2,
            (ComponentType::I8, 4, true) => F::Snorm8x4,

            (ComponentType::U16, 2, false) => F::Uint16x2,
            (ComponentType::U16, 4, false) => F::Uint16x4,
            (ComponentType::U16, 2, true) => F::Unorm16x2,
            (ComponentType::U16, 4, true) => F::Unorm16x4,

            (ComponentType::I16, 2, false) => F::Sint16x2,
            (ComponentType::I16, 4, false) => F::Sint16x4,
            (ComponentType::I16, 2, true) => F::Snorm16x2,
            (ComponentType::I16, 4, true) => F::Snorm16x4,

            _ => {
                return Err(LayoutError::UnsupportedFormat {
                    slot: self.slot,
                    component: self.component,
                    components: self.components,
                    normalize: self.normalize,
                });
            }
        };

        Ok(format)
    }
}

/// Validated description of how per-vertex bytes partition into attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    /// Distance in bytes between consecutive vertices.
    pub stride: u64,

    /// Attributes, in slot declaration order.
    pub attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    /// Checks that the attributes form an in-bounds, non-overlapping
    /// partition of the stride with unique slots and representable formats.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.stride == 0 {
            return Err(LayoutError::ZeroStride);
        }
        if self.attributes.is_empty() {
            return Err(LayoutError::NoAttributes);
        }

        for attr in &self.attributes {
            attr.vertex_format()?;

            let end = attr.offset + attr.byte_size();
            if end > self.stride {
                return Err(LayoutError::OutOfBounds {
                    slot: attr.slot,
                    end,
                    stride: self.stride,
                });
            }
        }

        for (i, a) in self.attributes.iter().enumerate() {
            for b in &self.attributes[i + 1..] {
                if a.slot == b.slot {
                    return Err(LayoutError::DuplicateSlot { slot: a.slot });
                }

                let a_end = a.offset + a.byte_size();
                let b_end = b.offset + b.byte_size();
                if a.offset < b_end && b.offset < a_end {
                    return Err(LayoutError::Overlap {
                        slot_a: a.slot,
                        slot_b: b.slot,
                    });
                }
            }
        }

        Ok(())
    }

    /// Lowers the layout to backend vertex attributes.
    ///
    /// Validates first; an invalid layout never reaches the backend.
    pub fn wgpu_attributes(&self) -> Result<Vec<wgpu::VertexAttribute>, LayoutError> {
        self.validate()?;

        self.attributes
            .iter()
            .map(|attr| {
                Ok(wgpu::VertexAttribute {
                    format: attr.vertex_format()?,
                    offset: attr.offset,
                    shader_location: attr.slot,
                })
            })
            .collect()
    }
}

/// Computes the vertex count for `len` bytes of data under `stride`.
///
/// Rejects empty data and any length that does not partition evenly.
fn partition_vertex_count(len: u64, stride: u64) -> Result<u32, LayoutError> {
    if len == 0 || stride == 0 || len % stride != 0 {
        return Err(LayoutError::DataLength { len, stride });
    }
    Ok((len / stride) as u32)
}

/// GPU-resident vertex data plus its validated interpretation layout.
///
/// The data is uploaded exactly once at construction; the binding is then
/// drawn many times. Teardown is `Drop`-driven.
pub struct GeometryBinding {
    buffer: wgpu::Buffer,
    layout: VertexLayout,
    vertex_count: u32,
}

impl GeometryBinding {
    /// Uploads `data` as vertex storage described by `layout`.
    ///
    /// The layout is validated (in-bounds, non-overlapping, unique slots) and
    /// the data length must be a positive whole multiple of the stride; both
    /// checks reject rather than silently accept.
    pub fn create(
        ctx: &RenderCtx<'_>,
        data: &[u8],
        layout: VertexLayout,
    ) -> Result<Self, LayoutError> {
        layout.validate()?;
        let vertex_count = partition_vertex_count(data.len() as u64, layout.stride)?;

        let buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("glint vertex buffer"),
                contents: data,
                usage: wgpu::BufferUsages::VERTEX,
            });

        Ok(Self {
            buffer,
            layout,
            vertex_count,
        })
    }

    /// Like [`GeometryBinding::create`], for a typed vertex slice.
    pub fn from_slice<V: bytemuck::Pod>(
        ctx: &RenderCtx<'_>,
        vertices: &[V],
        layout: VertexLayout,
    ) -> Result<Self, LayoutError> {
        Self::create(ctx, bytemuck::cast_slice(vertices), layout)
    }

    /// Returns the GPU buffer holding the vertex data.
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Returns the interpretation layout.
    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    /// Returns the number of vertices in the binding.
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f32_attr(slot: u32, components: u32, offset: u64) -> VertexAttribute {
        VertexAttribute {
            slot,
            components,
            component: ComponentType::F32,
            normalize: false,
            offset,
        }
    }

    fn position_layout() -> VertexLayout {
        VertexLayout {
            stride: 12,
            attributes: vec![f32_attr(0, 3, 0)],
        }
    }

    // ── validate ──────────────────────────────────────────────────────────

    #[test]
    fn position_layout_is_valid() {
        assert_eq!(position_layout().validate(), Ok(()));
    }

    #[test]
    fn interleaved_layout_is_valid() {
        // position (12 bytes) + color (16 bytes), stride 28.
        let layout = VertexLayout {
            stride: 28,
            attributes: vec![f32_attr(0, 3, 0), f32_attr(1, 4, 12)],
        };
        assert_eq!(layout.validate(), Ok(()));
    }

    #[test]
    fn zero_stride_is_rejected() {
        let layout = VertexLayout {
            stride: 0,
            attributes: vec![f32_attr(0, 3, 0)],
        };
        assert_eq!(layout.validate(), Err(LayoutError::ZeroStride));
    }

    #[test]
    fn empty_attribute_list_is_rejected() {
        let layout = VertexLayout {
            stride: 12,
            attributes: vec![],
        };
        assert_eq!(layout.validate(), Err(LayoutError::NoAttributes));
    }

    #[test]
    fn attribute_past_stride_is_rejected() {
        // Two floats starting at byte 8 end at 16, past a stride of 12.
        let layout = VertexLayout {
            stride: 12,
            attributes: vec![f32_attr(0, 2, 8)],
        };
        assert_eq!(
            layout.validate(),
            Err(LayoutError::OutOfBounds {
                slot: 0,
                end: 16,
                stride: 12
            })
        );
    }

    #[test]
    fn overlapping_attributes_are_rejected() {
        let layout = VertexLayout {
            stride: 16,
            attributes: vec![f32_attr(0, 2, 0), f32_attr(1, 2, 4)],
        };
        assert_eq!(
            layout.validate(),
            Err(LayoutError::Overlap {
                slot_a: 0,
                slot_b: 1
            })
        );
    }

    #[test]
    fn adjacent_attributes_do_not_overlap() {
        let layout = VertexLayout {
            stride: 16,
            attributes: vec![f32_attr(0, 2, 0), f32_attr(1, 2, 8)],
        };
        assert_eq!(layout.validate(), Ok(()));
    }

    #[test]
    fn duplicate_slots_are_rejected() {
        let layout = VertexLayout {
            stride: 16,
            attributes: vec![f32_attr(0, 2, 0), f32_attr(0, 2, 8)],
        };
        assert_eq!(layout.validate(), Err(LayoutError::DuplicateSlot { slot: 0 }));
    }

    // ── vertex_format ─────────────────────────────────────────────────────

    #[test]
    fn position_attribute_maps_to_float32x3() {
        assert_eq!(
            f32_attr(0, 3, 0).vertex_format(),
            Ok(wgpu::VertexFormat::Float32x3)
        );
    }

    #[test]
    fn normalized_u8x4_maps_to_unorm() {
        let attr = VertexAttribute {
            slot: 2,
            components: 4,
            component: ComponentType::U8,
            normalize: true,
            offset: 0,
        };
        assert_eq!(attr.vertex_format(), Ok(wgpu::VertexFormat::Unorm8x4));
    }

    #[test]
    fn three_component_u8_is_unsupported() {
        let attr = VertexAttribute {
            slot: 0,
            components: 3,
            component: ComponentType::U8,
            normalize: false,
            offset: 0,
        };
        assert!(matches!(
            attr.vertex_format(),
            Err(LayoutError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn normalized_float_is_unsupported() {
        let attr = VertexAttribute {
            slot: 0,
            components: 3,
            component: ComponentType::F32,
            normalize: true,
            offset: 0,
        };
        assert!(matches!(
            attr.vertex_format(),
            Err(LayoutError::UnsupportedFormat { .. })
        ));
    }

    // ── partition_vertex_count ────────────────────────────────────────────

    #[test]
    fn triangle_data_partitions_into_three_vertices() {
        assert_eq!(partition_vertex_count(36, 12), Ok(3));
    }

    #[test]
    fn ragged_data_length_is_rejected() {
        assert_eq!(
            partition_vertex_count(35, 12),
            Err(LayoutError::DataLength { len: 35, stride: 12 })
        );
    }

    #[test]
    fn empty_data_is_rejected() {
        assert_eq!(
            partition_vertex_count(0, 12),
            Err(LayoutError::DataLength { len: 0, stride: 12 })
        );
    }
}
