use crate::fault::Fault;

/// Flat data memory of 32-bit cells, sized once at construction.
///
/// This is a separate address space from both the register file and the
/// program. Addresses outside `[0, size)` are never read or written; the
/// access returns `Fault::MemoryOutOfRange` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataMemory {
    cells: Vec<u32>,
}

impl DataMemory {
    pub fn new(size: usize) -> Self {
        Self {
            cells: vec![0u32; size],
        }
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn load(&self, addr: u32) -> Result<u32, Fault> {
        self.cells
            .get(addr as usize)
            .copied()
            .ok_or(Fault::MemoryOutOfRange(addr))
    }

    pub fn store(&mut self, addr: u32, value: u32) -> Result<(), Fault> {
        let cell = self
            .cells
            .get_mut(addr as usize)
            .ok_or(Fault::MemoryOutOfRange(addr))?;
        *cell = value;
        Ok(())
    }

    /// Borrow `[start, end)` if the whole range is in bounds.
    pub fn mem_slice(&self, start: usize, end: usize) -> Option<&[u32]> {
        if start > end || end > self.cells.len() {
            return None;
        }
        Some(&self.cells[start..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mem_read_write() {
        let mut m = DataMemory::new(16);
        m.store(0x0F, 0xAA55).unwrap();
        assert_eq!(m.load(0x0F), Ok(0xAA55));
    }

    #[test]
    fn out_of_bounds_access_touches_nothing() {
        let mut m = DataMemory::new(4);
        assert_eq!(m.store(4, 1), Err(Fault::MemoryOutOfRange(4)));
        assert_eq!(m.load(100), Err(Fault::MemoryOutOfRange(100)));
        assert_eq!(m.mem_slice(0, 4), Some(&[0, 0, 0, 0][..]));
    }

    #[test]
    fn zero_sized_memory_rejects_every_address() {
        let m = DataMemory::new(0);
        assert_eq!(m.load(0), Err(Fault::MemoryOutOfRange(0)));
        assert_eq!(m.mem_slice(0, 1), None);
    }
}
