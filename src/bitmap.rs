use std::fmt;

/// Occupancy bitmap of the 32 branches of an indirection node.
#[derive(Clone, Copy, Default, Eq, PartialEq)]
pub struct Bitmap(u32);

impl Bitmap {
    pub const fn new() -> Self {
        Bitmap(0)
    }

    pub fn get(self, i: u8) -> bool {
        self.0 & (1 << i) != 0
    }

    pub fn set(self, i: u8) -> Self {
        Bitmap(self.0 | (1 << i))
    }

    pub fn unset(self, i: u8) -> Self {
        Bitmap(self.0 & !(1 << i))
    }

    pub fn size(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Counts the set bits below `i`.
    pub fn index(self, i: u8) -> usize {
        (self.0 & ((1 << i) - 1)).count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bitmap({:#034b})", self.0)
    }
}
