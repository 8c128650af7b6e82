pub mod manager;
pub mod models;
pub mod ownership;
pub mod repo;

pub use manager::{pool, DatabaseError};
pub use ownership::Entity;

/// Highest `$n` placeholder in a statement. Lets the repo tests pin the
/// bind layout of each statement to the `.bind(...)` calls that feed it.
#[cfg(test)]
pub(crate) fn max_bind(sql: &str) -> u32 {
    let mut max = 0;
    let bytes = sql.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'$' {
            let mut j = i + 1;
            let mut n: u32 = 0;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                n = n * 10 + u32::from(bytes[j] - b'0');
                j += 1;
            }
            if j > i + 1 && n > max {
                max = n;
            }
            i = j;
        } else {
            i += 1;
        }
    }
    max
}
