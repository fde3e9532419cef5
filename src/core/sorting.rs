// src/core/sorting.rs

use std::cmp::Ordering;

/// Byte-wise comparison of environment names, without locale awareness.
pub fn alphanumeric_sort(a: &str, b: &str) -> Ordering {
    a.as_bytes().cmp(b.as_bytes())
}

/// Compares dot-separated versions component by component as integers.
///
/// A non-numeric component sorts below any numeric one (two non-numeric
/// components fall back to byte order), and when one version is a prefix of
/// the other the shorter one is lesser. `3.9 < 3.10`.
pub fn semantic_versioning_sort(a: &str, b: &str) -> Ordering {
    let mut parts_a = a.split('.');
    let mut parts_b = b.split('.');
    loop {
        match (parts_a.next(), parts_b.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (x.parse::<u64>(), y.parse::<u64>()) {
                    (Ok(x), Ok(y)) => x.cmp(&y),
                    (Err(_), Ok(_)) => Ordering::Less,
                    (Ok(_), Err(_)) => Ordering::Greater,
                    (Err(_), Err(_)) => x.as_bytes().cmp(y.as_bytes()),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}
