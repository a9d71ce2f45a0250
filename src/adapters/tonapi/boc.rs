//! Minimal bag-of-cells reader.
//!
//! Decodes the root cell of a serialized BOC and reads a standard internal
//! address (`addr_std$10`, no anycast) from the start of its data bits.
//! That is all `get_nft_data` needs for the owner slot. The CRC32C trailer,
//! when present, is not verified.

use anyhow::{Context, Result, bail, ensure};

use crate::domain::Address;

const BOC_MAGIC: [u8; 4] = [0xb5, 0xee, 0x9c, 0x72];

/// Big-endian cursor over a byte slice.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(n).context("BOC offset overflow")?;
        let slice = self.data.get(self.pos..end).context("BOC is truncated")?;
        self.pos = end;
        Ok(slice)
    }

    fn byte(&mut self) -> Result<u8> {
        Ok(self.bytes(1)?[0])
    }

    fn uint(&mut self, size: usize) -> Result<usize> {
        ensure!(size <= 8, "BOC integer width {size} is too large");
        let mut value = 0usize;
        for &b in self.bytes(size)? {
            value = (value << 8) | usize::from(b);
        }
        Ok(value)
    }
}

/// Data bits of a single cell.
struct CellData<'a> {
    bytes: &'a [u8],
    bit_len: usize,
}

impl CellData<'_> {
    fn bit(&self, i: usize) -> bool {
        (self.bytes[i / 8] >> (7 - i % 8)) & 1 == 1
    }

    fn uint(&self, offset: usize, width: usize) -> u64 {
        (offset..offset + width).fold(0, |acc, i| (acc << 1) | u64::from(self.bit(i)))
    }
}

/// Parse a BOC and return the data bits of its first root cell.
fn root_cell(boc: &[u8]) -> Result<CellData<'_>> {
    let mut r = Reader::new(boc);
    ensure!(r.bytes(4)? == BOC_MAGIC, "not a BOC (bad magic)");

    let flags = r.byte()?;
    let has_index = flags & 0x80 != 0;
    let ref_size = usize::from(flags & 0x07);
    ensure!((1..=4).contains(&ref_size), "invalid BOC reference size {ref_size}");
    let offset_size = usize::from(r.byte()?);
    ensure!((1..=8).contains(&offset_size), "invalid BOC offset size {offset_size}");

    let cell_count = r.uint(ref_size)?;
    let root_count = r.uint(ref_size)?;
    let _absent = r.uint(ref_size)?;
    let _total_size = r.uint(offset_size)?;
    ensure!(root_count > 0, "BOC has no roots");
    let root = r.uint(ref_size)?;
    r.bytes((root_count - 1) * ref_size)?;
    ensure!(root < cell_count, "BOC root index {root} out of range");
    if has_index {
        r.bytes(cell_count * offset_size)?;
    }

    for index in 0..=root {
        let d1 = r.byte()?;
        let d2 = r.byte()?;
        let refs = usize::from(d1 & 0x07);
        let data_len = usize::from(d2).div_ceil(2);
        let data = r.bytes(data_len)?;
        r.bytes(refs * ref_size)?;

        if index == root {
            ensure!(d1 & 0x08 == 0, "exotic root cell is not supported");
            let bit_len = if d2 % 2 == 0 {
                data_len * 8
            } else {
                let last = *data.last().context("empty padded cell")?;
                ensure!(last != 0, "missing completion tag");
                data_len * 8 - last.trailing_zeros() as usize - 1
            };
            return Ok(CellData {
                bytes: data,
                bit_len,
            });
        }
    }

    bail!("BOC root cell not found")
}

/// Read the address stored at the beginning of a BOC's root cell.
pub fn read_address(boc: &[u8]) -> Result<Address> {
    let cell = root_cell(boc)?;
    ensure!(cell.bit_len >= 2, "cell too short for an address");

    match cell.uint(0, 2) {
        0b10 => {}
        0b00 => bail!("address is addr_none"),
        tag => bail!("unsupported address tag {tag:#04b}"),
    }
    ensure!(cell.bit_len >= 267, "cell too short for addr_std");
    ensure!(!cell.bit(2), "anycast addresses are not supported");

    let workchain = i8::from_be_bytes([cell.uint(3, 8) as u8]);
    let mut hash = [0u8; 32];
    for (i, byte) in hash.iter_mut().enumerate() {
        *byte = cell.uint(11 + i * 8, 8) as u8;
    }

    Ok(Address::new(workchain, hash))
}

/// Decode a hex-encoded BOC and read its address.
pub fn read_address_hex(boc_hex: &str) -> Result<Address> {
    let bytes = hex::decode(boc_hex.trim()).context("BOC is not valid hex")?;
    read_address(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Serialize a single cell holding `addr_std` for `address`.
    pub(crate) fn address_boc(address: &Address, with_crc: bool) -> Vec<u8> {
        let mut bits: Vec<bool> = vec![true, false, false];
        let push = |bits: &mut Vec<bool>, byte: u8| {
            bits.extend((0..8).rev().map(|i| (byte >> i) & 1 == 1));
        };
        push(&mut bits, address.workchain().to_be_bytes()[0]);
        for &b in address.hash() {
            push(&mut bits, b);
        }
        assert_eq!(bits.len(), 267);

        bits.push(true);
        while bits.len() % 8 != 0 {
            bits.push(false);
        }
        let data: Vec<u8> = bits
            .chunks(8)
            .map(|chunk| chunk.iter().fold(0u8, |acc, &b| (acc << 1) | u8::from(b)))
            .collect();
        let d2 = u8::try_from(267 / 8 + 267usize.div_ceil(8)).unwrap();

        let mut boc = BOC_MAGIC.to_vec();
        boc.push(if with_crc { 0x41 } else { 0x01 });
        boc.push(1);
        boc.extend([1, 1, 0]);
        boc.push(u8::try_from(2 + data.len()).unwrap());
        boc.push(0);
        boc.extend([0, d2]);
        boc.extend(&data);
        if with_crc {
            boc.extend([0, 0, 0, 0]);
        }
        boc
    }

    #[test]
    fn test_reads_std_address() {
        let address: Address = "EQC3dNlesgVD8YbAazcauIrXBPfiVhMMr5YYk2in0Mtsz0Bz".parse().unwrap();
        let boc = address_boc(&address, false);
        assert_eq!(read_address(&boc).unwrap(), address);
        assert_eq!(read_address_hex(&hex::encode(&boc)).unwrap(), address);
    }

    #[test]
    fn test_masterchain_address_with_crc_trailer() {
        let address = Address::new(-1, [0x5a; 32]);
        let boc = address_boc(&address, true);
        assert_eq!(read_address(&boc).unwrap(), address);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(read_address(&[0, 1, 2, 3, 4]).is_err());
        assert!(read_address_hex("zz").is_err());

        let mut truncated = address_boc(&Address::new(0, [1; 32]), false);
        truncated.truncate(20);
        assert!(read_address(&truncated).is_err());
    }
}
