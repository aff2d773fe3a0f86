use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

/// Bytes read from each stream per iteration.
const CHUNK_SIZE: usize = 4096;
/// Comparison word width in bytes.
const WORD: usize = std::mem::size_of::<u64>();

/// Byte-exact equality check between two files.
///
/// Files of differing length compare unequal without any content read.
/// Equal-length files are streamed in fixed-size chunks and compared in
/// 8-byte word groups. Equality is exact and total.
pub fn files_equal(a: &Path, b: &Path) -> io::Result<bool> {
    if fs::metadata(a)?.len() != fs::metadata(b)?.len() {
        return Ok(false);
    }
    let file_a = File::open(a)?;
    let file_b = File::open(b)?;
    streams_equal(file_a, file_b)
}

/// Compare two streams chunk by chunk.
///
/// Both streams are read with the same chunk size. Differing read
/// counts report inequality, a zero-length read on both sides with no
/// prior mismatch reports equality.
pub fn streams_equal<A: Read, B: Read>(mut a: A, mut b: B) -> io::Result<bool> {
    // u64 buffers keep the word view aligned; the byte view is handed
    // to read. Both start zeroed, and every word that compared equal
    // stays equal in place, so the stale tail beyond a partial final
    // read is identical on both sides when it gets reinterpreted.
    let mut buf_a = [0u64; CHUNK_SIZE / WORD];
    let mut buf_b = [0u64; CHUNK_SIZE / WORD];

    loop {
        let count_a = read_chunk(&mut a, bytemuck::cast_slice_mut(&mut buf_a))?;
        let count_b = read_chunk(&mut b, bytemuck::cast_slice_mut(&mut buf_b))?;

        if count_a != count_b {
            return Ok(false);
        }
        if count_a == 0 {
            return Ok(true);
        }

        let words = count_a.div_ceil(WORD);
        if buf_a[..words] != buf_b[..words] {
            return Ok(false);
        }
    }
}

fn read_chunk<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match reader.read(buf) {
            Ok(n) => return Ok(n),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}
