//! Compiled-in geometry for the demos.
//!
//! Every array stores all vertex positions first (3 floats each), then all
//! vertex colors (4 floats each), matching [`super::geometry::GeometryBuffer`].
//! Triangles are wound clockwise when seen from outside.

const RIGHT_EXTENT: f32 = 0.8;
const LEFT_EXTENT: f32 = -RIGHT_EXTENT;
const TOP_EXTENT: f32 = 0.20;
const MIDDLE_EXTENT: f32 = 0.0;
const BOTTOM_EXTENT: f32 = -TOP_EXTENT;
const FRONT_EXTENT: f32 = -1.25;
const REAR_EXTENT: f32 = -1.75;

const GREEN: [f32; 4] = [0.75, 0.75, 1.0, 1.0];
const BLUE: [f32; 4] = [0.0, 0.5, 0.0, 1.0];
const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const GREY: [f32; 4] = [0.8, 0.8, 0.8, 1.0];
const BROWN: [f32; 4] = [0.5, 0.5, 0.0, 1.0];
const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];

/// Vertices per wedge; the two wedges are stored back to back.
pub const WEDGE_VERTEX_COUNT: u32 = 18;

/// Two wedge-shaped objects sharing one buffer. The second is the first
/// turned on its side. Both are drawn with [`WEDGE_INDICES`].
#[rustfmt::skip]
pub const WEDGE_VERTICES: [f32; 2 * WEDGE_VERTEX_COUNT as usize * 7] = [
    // object 1 positions
    LEFT_EXTENT, TOP_EXTENT, REAR_EXTENT,
    LEFT_EXTENT, MIDDLE_EXTENT, FRONT_EXTENT,
    RIGHT_EXTENT, MIDDLE_EXTENT, FRONT_EXTENT,
    RIGHT_EXTENT, TOP_EXTENT, REAR_EXTENT,

    LEFT_EXTENT, BOTTOM_EXTENT, REAR_EXTENT,
    LEFT_EXTENT, MIDDLE_EXTENT, FRONT_EXTENT,
    RIGHT_EXTENT, MIDDLE_EXTENT, FRONT_EXTENT,
    RIGHT_EXTENT, BOTTOM_EXTENT, REAR_EXTENT,

    LEFT_EXTENT, TOP_EXTENT, REAR_EXTENT,
    LEFT_EXTENT, MIDDLE_EXTENT, FRONT_EXTENT,
    LEFT_EXTENT, BOTTOM_EXTENT, REAR_EXTENT,

    RIGHT_EXTENT, TOP_EXTENT, REAR_EXTENT,
    RIGHT_EXTENT, MIDDLE_EXTENT, FRONT_EXTENT,
    RIGHT_EXTENT, BOTTOM_EXTENT, REAR_EXTENT,

    LEFT_EXTENT, BOTTOM_EXTENT, REAR_EXTENT,
    LEFT_EXTENT, TOP_EXTENT, REAR_EXTENT,
    RIGHT_EXTENT, TOP_EXTENT, REAR_EXTENT,
    RIGHT_EXTENT, BOTTOM_EXTENT, REAR_EXTENT,

    // object 2 positions
    TOP_EXTENT, RIGHT_EXTENT, REAR_EXTENT,
    MIDDLE_EXTENT, RIGHT_EXTENT, FRONT_EXTENT,
    MIDDLE_EXTENT, LEFT_EXTENT, FRONT_EXTENT,
    TOP_EXTENT, LEFT_EXTENT, REAR_EXTENT,

    BOTTOM_EXTENT, RIGHT_EXTENT, REAR_EXTENT,
    MIDDLE_EXTENT, RIGHT_EXTENT, FRONT_EXTENT,
    MIDDLE_EXTENT, LEFT_EXTENT, FRONT_EXTENT,
    BOTTOM_EXTENT, LEFT_EXTENT, REAR_EXTENT,

    TOP_EXTENT, RIGHT_EXTENT, REAR_EXTENT,
    MIDDLE_EXTENT, RIGHT_EXTENT, FRONT_EXTENT,
    BOTTOM_EXTENT, RIGHT_EXTENT, REAR_EXTENT,

    TOP_EXTENT, LEFT_EXTENT, REAR_EXTENT,
    MIDDLE_EXTENT, LEFT_EXTENT, FRONT_EXTENT,
    BOTTOM_EXTENT, LEFT_EXTENT, REAR_EXTENT,

    BOTTOM_EXTENT, RIGHT_EXTENT, REAR_EXTENT,
    TOP_EXTENT, RIGHT_EXTENT, REAR_EXTENT,
    TOP_EXTENT, LEFT_EXTENT, REAR_EXTENT,
    BOTTOM_EXTENT, LEFT_EXTENT, REAR_EXTENT,

    // object 1 colors
    GREEN[0], GREEN[1], GREEN[2], GREEN[3],
    GREEN[0], GREEN[1], GREEN[2], GREEN[3],
    GREEN[0], GREEN[1], GREEN[2], GREEN[3],
    GREEN[0], GREEN[1], GREEN[2], GREEN[3],

    BLUE[0], BLUE[1], BLUE[2], BLUE[3],
    BLUE[0], BLUE[1], BLUE[2], BLUE[3],
    BLUE[0], BLUE[1], BLUE[2], BLUE[3],
    BLUE[0], BLUE[1], BLUE[2], BLUE[3],

    RED[0], RED[1], RED[2], RED[3],
    RED[0], RED[1], RED[2], RED[3],
    RED[0], RED[1], RED[2], RED[3],

    GREY[0], GREY[1], GREY[2], GREY[3],
    GREY[0], GREY[1], GREY[2], GREY[3],
    GREY[0], GREY[1], GREY[2], GREY[3],

    BROWN[0], BROWN[1], BROWN[2], BROWN[3],
    BROWN[0], BROWN[1], BROWN[2], BROWN[3],
    BROWN[0], BROWN[1], BROWN[2], BROWN[3],
    BROWN[0], BROWN[1], BROWN[2], BROWN[3],

    // object 2 colors
    RED[0], RED[1], RED[2], RED[3],
    RED[0], RED[1], RED[2], RED[3],
    RED[0], RED[1], RED[2], RED[3],
    RED[0], RED[1], RED[2], RED[3],

    BROWN[0], BROWN[1], BROWN[2], BROWN[3],
    BROWN[0], BROWN[1], BROWN[2], BROWN[3],
    BROWN[0], BROWN[1], BROWN[2], BROWN[3],
    BROWN[0], BROWN[1], BROWN[2], BROWN[3],

    BLUE[0], BLUE[1], BLUE[2], BLUE[3],
    BLUE[0], BLUE[1], BLUE[2], BLUE[3],
    BLUE[0], BLUE[1], BLUE[2], BLUE[3],

    GREEN[0], GREEN[1], GREEN[2], GREEN[3],
    GREEN[0], GREEN[1], GREEN[2], GREEN[3],
    GREEN[0], GREEN[1], GREEN[2], GREEN[3],

    GREY[0], GREY[1], GREY[2], GREY[3],
    GREY[0], GREY[1], GREY[2], GREY[3],
    GREY[0], GREY[1], GREY[2], GREY[3],
    GREY[0], GREY[1], GREY[2], GREY[3],
];

#[rustfmt::skip]
pub const WEDGE_INDICES: [u16; 24] = [
    0, 2, 1,
    3, 2, 0,

    4, 5, 6,
    6, 7, 4,

    8, 9, 10,
    11, 13, 12,

    14, 16, 15,
    17, 16, 14,
];

pub const CUBE_VERTEX_COUNT: u32 = 24;

/// A 2x2x2 cube centred on the origin, one colour per face.
#[rustfmt::skip]
pub const CUBE_VERTICES: [f32; CUBE_VERTEX_COUNT as usize * 7] = [
    // +z
    -1.0, 1.0, 1.0,
    1.0, 1.0, 1.0,
    1.0, -1.0, 1.0,
    -1.0, -1.0, 1.0,
    // -z
    1.0, 1.0, -1.0,
    -1.0, 1.0, -1.0,
    -1.0, -1.0, -1.0,
    1.0, -1.0, -1.0,
    // +x
    1.0, 1.0, 1.0,
    1.0, 1.0, -1.0,
    1.0, -1.0, -1.0,
    1.0, -1.0, 1.0,
    // -x
    -1.0, 1.0, -1.0,
    -1.0, 1.0, 1.0,
    -1.0, -1.0, 1.0,
    -1.0, -1.0, -1.0,
    // +y
    -1.0, 1.0, -1.0,
    1.0, 1.0, -1.0,
    1.0, 1.0, 1.0,
    -1.0, 1.0, 1.0,
    // -y
    -1.0, -1.0, 1.0,
    1.0, -1.0, 1.0,
    1.0, -1.0, -1.0,
    -1.0, -1.0, -1.0,

    GREEN[0], GREEN[1], GREEN[2], GREEN[3],
    GREEN[0], GREEN[1], GREEN[2], GREEN[3],
    GREEN[0], GREEN[1], GREEN[2], GREEN[3],
    GREEN[0], GREEN[1], GREEN[2], GREEN[3],
    BLUE[0], BLUE[1], BLUE[2], BLUE[3],
    BLUE[0], BLUE[1], BLUE[2], BLUE[3],
    BLUE[0], BLUE[1], BLUE[2], BLUE[3],
    BLUE[0], BLUE[1], BLUE[2], BLUE[3],
    RED[0], RED[1], RED[2], RED[3],
    RED[0], RED[1], RED[2], RED[3],
    RED[0], RED[1], RED[2], RED[3],
    RED[0], RED[1], RED[2], RED[3],
    GREY[0], GREY[1], GREY[2], GREY[3],
    GREY[0], GREY[1], GREY[2], GREY[3],
    GREY[0], GREY[1], GREY[2], GREY[3],
    GREY[0], GREY[1], GREY[2], GREY[3],
    BROWN[0], BROWN[1], BROWN[2], BROWN[3],
    BROWN[0], BROWN[1], BROWN[2], BROWN[3],
    BROWN[0], BROWN[1], BROWN[2], BROWN[3],
    BROWN[0], BROWN[1], BROWN[2], BROWN[3],
    YELLOW[0], YELLOW[1], YELLOW[2], YELLOW[3],
    YELLOW[0], YELLOW[1], YELLOW[2], YELLOW[3],
    YELLOW[0], YELLOW[1], YELLOW[2], YELLOW[3],
    YELLOW[0], YELLOW[1], YELLOW[2], YELLOW[3],
];

#[rustfmt::skip]
pub const CUBE_INDICES: [u16; 36] = [
    0, 1, 2, 2, 3, 0,
    4, 5, 6, 6, 7, 4,
    8, 9, 10, 10, 11, 8,
    12, 13, 14, 14, 15, 12,
    16, 17, 18, 18, 19, 16,
    20, 21, 22, 22, 23, 20,
];
