//! Image asset handling: data-URI references and premultiplied decoding.

pub mod image;
