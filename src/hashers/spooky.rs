//! SpookyHash V2 (Bob Jenkins), 128-bit state folded to a 64-bit digest.
//!
//! Inputs shorter than 192 bytes take the short path, everything else is
//! consumed in 96-byte blocks by the twelve-word mixer. Words are read
//! little-endian regardless of the host.

const NUM_VARS: usize = 12;
const BLOCK_SIZE: usize = NUM_VARS * 8;
const BUF_SIZE: usize = 2 * BLOCK_SIZE;
const SC_CONST: u64 = 0xdead_beef_dead_beef;

const MIX_ROT: [u32; NUM_VARS] = [11, 32, 43, 31, 17, 28, 39, 57, 55, 54, 22, 46];
const END_ROT: [u32; NUM_VARS] = [44, 15, 34, 21, 38, 33, 10, 13, 38, 53, 42, 54];
const SHORT_MIX_ROT: [u32; 12] = [50, 52, 30, 41, 54, 48, 38, 37, 62, 34, 5, 36];
const SHORT_END_ROT: [u32; 11] = [15, 52, 26, 51, 28, 9, 47, 54, 32, 25, 63];

/// 64-bit SpookyHash V2 of `data` with `seed` in both state halves.
pub fn spooky_hash64(data: &[u8], seed: u64) -> u64 {
    hash128(data, seed, seed).0
}

/// Low 32 bits of [`spooky_hash64`].
pub fn spooky_hash32(data: &[u8], seed: u32) -> u32 {
    hash128(data, seed as u64, seed as u64).0 as u32
}

pub fn hash128(data: &[u8], seed1: u64, seed2: u64) -> (u64, u64) {
    if data.len() < BUF_SIZE {
        return short(data, seed1, seed2);
    }

    let mut h = [0u64; NUM_VARS];
    for i in (0..NUM_VARS).step_by(3) {
        h[i] = seed1;
        h[i + 1] = seed2;
        h[i + 2] = SC_CONST;
    }

    let mut blocks = data.chunks_exact(BLOCK_SIZE);
    for block in &mut blocks {
        mix(&read_words(block), &mut h);
    }

    // Final partial block is zero padded and tagged with its length.
    let tail = blocks.remainder();
    let mut buf = [0u8; BLOCK_SIZE];
    buf[..tail.len()].copy_from_slice(tail);
    buf[BLOCK_SIZE - 1] = tail.len() as u8;
    end(&read_words(&buf), &mut h);

    (h[0], h[1])
}

fn short(data: &[u8], seed1: u64, seed2: u64) -> (u64, u64) {
    let mut h = [seed1, seed2, SC_CONST, SC_CONST];
    let mut rest = data;

    if data.len() > 15 {
        let mut chunks = rest.chunks_exact(32);
        for chunk in &mut chunks {
            h[2] = h[2].wrapping_add(read_u64(&chunk[0..]));
            h[3] = h[3].wrapping_add(read_u64(&chunk[8..]));
            short_mix(&mut h);
            h[0] = h[0].wrapping_add(read_u64(&chunk[16..]));
            h[1] = h[1].wrapping_add(read_u64(&chunk[24..]));
        }
        rest = chunks.remainder();

        if rest.len() >= 16 {
            h[2] = h[2].wrapping_add(read_u64(&rest[0..]));
            h[3] = h[3].wrapping_add(read_u64(&rest[8..]));
            short_mix(&mut h);
            rest = &rest[16..];
        }
    }

    h[3] = h[3].wrapping_add((data.len() as u64) << 56);
    match rest.len() {
        0 => {
            h[2] = h[2].wrapping_add(SC_CONST);
            h[3] = h[3].wrapping_add(SC_CONST);
        }
        1..=7 => {
            h[2] = h[2].wrapping_add(read_partial(rest));
        }
        _ => {
            h[2] = h[2].wrapping_add(read_u64(rest));
            h[3] = h[3].wrapping_add(read_partial(&rest[8..]));
        }
    }
    short_end(&mut h);

    (h[0], h[1])
}

fn mix(data: &[u64; NUM_VARS], s: &mut [u64; NUM_VARS]) {
    for i in 0..NUM_VARS {
        let (n1, n2, n10, n11) = (
            (i + 1) % NUM_VARS,
            (i + 2) % NUM_VARS,
            (i + 10) % NUM_VARS,
            (i + 11) % NUM_VARS,
        );
        s[i] = s[i].wrapping_add(data[i]);
        s[n2] ^= s[n10];
        s[n11] ^= s[i];
        s[i] = s[i].rotate_left(MIX_ROT[i]);
        s[n11] = s[n11].wrapping_add(s[n1]);
    }
}

fn end_partial(h: &mut [u64; NUM_VARS]) {
    for (i, &rot) in END_ROT.iter().enumerate() {
        let (n1, n2, n11) = (
            (i + 1) % NUM_VARS,
            (i + 2) % NUM_VARS,
            (i + 11) % NUM_VARS,
        );
        h[n11] = h[n11].wrapping_add(h[n1]);
        h[n2] ^= h[n11];
        h[n1] = h[n1].rotate_left(rot);
    }
}

fn end(data: &[u64; NUM_VARS], h: &mut [u64; NUM_VARS]) {
    for (word, d) in h.iter_mut().zip(data) {
        *word = word.wrapping_add(*d);
    }
    end_partial(h);
    end_partial(h);
    end_partial(h);
}

fn short_mix(h: &mut [u64; 4]) {
    for (i, &rot) in SHORT_MIX_ROT.iter().enumerate() {
        let x = (i + 2) % 4;
        let y = (i + 3) % 4;
        let z = i % 4;
        h[x] = h[x].rotate_left(rot);
        h[x] = h[x].wrapping_add(h[y]);
        h[z] ^= h[x];
    }
}

fn short_end(h: &mut [u64; 4]) {
    for (i, &rot) in SHORT_END_ROT.iter().enumerate() {
        let x = (i + 2) % 4;
        let z = (i + 3) % 4;
        h[z] ^= h[x];
        h[x] = h[x].rotate_left(rot);
        h[z] = h[z].wrapping_add(h[x]);
    }
}

fn read_words(block: &[u8]) -> [u64; NUM_VARS] {
    let mut words = [0u64; NUM_VARS];
    for (word, bytes) in words.iter_mut().zip(block.chunks_exact(8)) {
        *word = read_u64(bytes);
    }
    words
}

fn read_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[..8]);
    u64::from_le_bytes(buf)
}

/// Little-endian value of up to eight bytes, zero extended.
fn read_partial(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .enumerate()
        .fold(0u64, |acc, (i, &b)| acc | ((b as u64) << (8 * i)))
}
