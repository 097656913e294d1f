//! Branch Target Buffer (BTB).
//!
//! The BTB is a direct-mapped cache that stores target addresses for control
//! flow instructions, letting the fetch stage predict a branch target before
//! the instruction is decoded. The tag is the full PC, so a hit is never
//! reported for an aliasing address. Entries are only ever overwritten
//! wholesale; nothing invalidates them.

/// An entry in the Branch Target Buffer.
#[derive(Clone, Copy, Debug, Default)]
struct BtbEntry {
    /// Full PC of the branch this entry belongs to.
    tag: u32,
    /// The predicted target address.
    target: u32,
    /// Indicates if this entry contains valid data.
    valid: bool,
}

/// Branch Target Buffer structure.
#[derive(Debug)]
pub struct Btb {
    table: Vec<BtbEntry>,
    size: usize,
}

impl Btb {
    /// Creates a new BTB with `size` entries.
    ///
    /// # Panics
    ///
    /// Panics if `size` is not a power of two.
    pub fn new(size: usize) -> Self {
        assert!(size.is_power_of_two(), "BTB size must be a power of two");
        Self {
            table: vec![BtbEntry::default(); size],
            size,
        }
    }

    /// Index for a PC: word-aligned bits masked to the table size.
    fn index(&self, pc: u32) -> usize {
        ((pc >> 2) as usize) & (self.size - 1)
    }

    /// Looks up a target address for the given PC.
    ///
    /// Returns the predicted target if a valid entry exists and its tag
    /// matches the full PC, otherwise `None`.
    pub fn lookup(&self, pc: u32) -> Option<u32> {
        let e = self.table[self.index(pc)];
        if e.valid && e.tag == pc { Some(e.target) } else { None }
    }

    /// Writes a new entry (or overwrites the existing one) for `pc`.
    ///
    /// Called only when a branch resolves taken; untaken branches never
    /// enter the BTB.
    pub fn update(&mut self, pc: u32, target: u32) {
        let idx = self.index(pc);
        self.table[idx] = BtbEntry {
            tag: pc,
            target,
            valid: true,
        };
    }
}
