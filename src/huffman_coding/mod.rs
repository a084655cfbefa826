//! The huffman module builds the code used for a file.
//!
//! The tree lives in one arena indexed by node number; parent and child links are indices,
//! never owning pointers. The way the two smallest nodes are picked at every merge is part
//! of the file format, because it decides the exact codeword of every byte.
//!

pub mod codebook;
pub mod tree;
