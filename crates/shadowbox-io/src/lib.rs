//! Mesh serialization.
#![forbid(unsafe_code)]

pub mod stl;

pub use stl::{
    HEADER_LEN, RECORD_LEN, StlError, encode_binary_stl, encoded_len, read_triangle_count,
    write_binary_stl,
};
