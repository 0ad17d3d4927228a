/// Pull exactly `N` bytes out of the iterator. On a short read, returns how
/// many bytes were actually available.
pub fn read_buffer<const N: usize, I: Iterator<Item = u8>>(it: &mut I) -> Result<[u8; N], usize> {
    let mut res = [0u8; N];

    for (idx, slot) in res.iter_mut().enumerate() {
        match it.next() {
            None => return Err(idx),
            Some(n) => *slot = n,
        }
    }

    Ok(res)
}
