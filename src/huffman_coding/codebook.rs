use log::{debug, trace};
use rustc_hash::FxHashMap;

use super::tree::HuffmanTree;
use crate::tools::error::CodecError;

/// A codeword of `len` bits, right aligned in `bits`. The most significant of the
/// `len` bits is the first one written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codeword {
    pub bits: u64,
    pub len: u8,
}

impl Codeword {
    /// The codeword as a string of '0' and '1', first bit first.
    pub fn to_bit_string(&self) -> String {
        (0..self.len)
            .rev()
            .map(|i| if (self.bits >> i) & 1 == 1 { '1' } else { '0' })
            .collect()
    }

    /// True if `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Codeword) -> bool {
        if self.len == 0 {
            return true;
        }
        self.len <= other.len && other.bits >> (other.len - self.len) == self.bits
    }
}

/// Symbol to codeword map, built once from a tree and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Codebook {
    codes: FxHashMap<u8, Codeword>,
}

impl Codebook {
    /// Walk from every leaf up to the root, putting each edge label in front of the
    /// bits collected so far.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self, CodecError> {
        let mut codes = FxHashMap::default();
        codes.reserve(tree.leaves());

        for leaf in 0..tree.leaves() {
            // Leaves always hold a symbol
            let symbol = match tree.symbol(leaf) {
                Some(sym) => sym,
                None => continue,
            };
            let mut code = Codeword { bits: 0, len: 0 };
            let mut node = leaf;
            while let Some(parent) = tree.node(node).parent {
                if code.len == 64 {
                    return Err(CodecError::CodeTooLong(symbol));
                }
                code.bits |= (tree.node(node).code as u64) << code.len;
                code.len += 1;
                node = parent;
            }
            trace!("{:#04x}: {}", symbol, code.to_bit_string());
            codes.insert(symbol, code);
        }
        debug!("Generated {} codewords.", codes.len());
        Ok(Self { codes })
    }

    pub fn get(&self, symbol: u8) -> Option<Codeword> {
        self.codes.get(&symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, Codeword)> + '_ {
        self.codes.iter().map(|(&sym, &code)| (sym, code))
    }
}
