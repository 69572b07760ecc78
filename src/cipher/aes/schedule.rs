//! Key expansion into bit-sliced round keys.
//!
//! The classical AES schedule (FIPS 197 section 5.2) generates the round
//! keys four bytes at a time, as a recurrence over 32-bit words: each word
//! is the XOR of the word `nk` positions back and the previous word, with
//! the previous word rotated, substituted, and round-constant-folded at
//! every `nk` boundary. Since the recurrence only ever reaches `nk ≤ 8`
//! words into the past, the words in flight live in an eight-slot ring
//! buffer; every completed group of four columns is sliced into the next
//! round-key state, where AddRoundKey consumes it directly.
//!
//! Everything here is driven by public quantities only. The word index, the
//! ring position, and the round counter depend on the key *size*, never on
//! key *bits*; the single substitution step reuses the constant-time S-box
//! circuit on a scratch state, and the round constant advances branch-free.

use {super::state::State, docext::docext};

/// Expand a cipher key into the `ROUND_KEYS` bit-sliced round keys.
pub(crate) fn expand<
    const NK: usize,         // Key size in words.
    const KEY_BYTES: usize,  // NK * 4.
    const ROUND_KEYS: usize, // Number of rounds plus one.
>(
    key: [u8; KEY_BYTES],
) -> [State; ROUND_KEYS] {
    let mut schedule = [State::default(); ROUND_KEYS];
    // The last eight words of the recurrence, indexed modulo 8.
    let mut ring = [0u32; 8];
    // The column group being assembled for the next round-key slot.
    let mut group = [0u32; 4];
    let mut rcon: u8 = 0x01;

    for i in 0..4 * ROUND_KEYS {
        let word = if i < NK {
            u32::from_be_bytes([key[4 * i], key[4 * i + 1], key[4 * i + 2], key[4 * i + 3]])
        } else {
            let mut temp = ring[(i - 1) % 8];
            if i % NK == 0 {
                temp = sub_word(rot_word(temp)) ^ (u32::from(rcon) << 24);
                rcon = double(rcon);
            } else if NK > 6 && i % NK == 4 {
                temp = sub_word(temp);
            }
            ring[(i - NK) % 8] ^ temp
        };
        ring[i % 8] = word;
        group[i % 4] = word;
        if i % 4 == 3 {
            schedule[i / 4] = State::from_words(group);
        }
    }
    schedule
}

/// Rotate the bytes of a schedule word left by one position.
fn rot_word(word: u32) -> u32 {
    word.rotate_left(8)
}

/// Apply the S-box to each byte of a schedule word.
///
/// The four bytes are scattered into row 0 of a scratch state, so byte `j`
/// of the word occupies bit `j` of every slice, and the full SubBytes
/// circuit runs over the mostly-empty state. Wasteful of the other twelve
/// lanes, but it keeps the schedule on the same no-lookup substitution as
/// the cipher itself, and it runs once per `nk` words.
fn sub_word(word: u32) -> u32 {
    let mut state = State::default();
    for (j, byte) in word.to_be_bytes().into_iter().enumerate() {
        state.load_byte(byte, 0, j);
    }
    state.sub_bytes();
    let mut bytes = [0u8; 4];
    for (j, byte) in bytes.iter_mut().enumerate() {
        for (i, slice) in state.slice.iter().enumerate() {
            *byte |= (((slice >> j) & 1) as u8) << i;
        }
    }
    u32::from_be_bytes(bytes)
}

/// Advance the round constant: multiply by $x$ in $GF(2^8)$.
///
/// Doubling reduces by the field polynomial exactly when the top bit is
/// set, folded in here as a mask rather than a branch:
///
/// $$
/// \mathrm{rcon} \gets (\mathrm{rcon} \ll 1) \oplus
/// (\mathrm{1b_{16}} \cdot \mathrm{rcon}_7)
/// $$
#[docext]
fn double(rcon: u8) -> u8 {
    ((rcon >> 7).wrapping_neg() & 0x1B) ^ (rcon << 1)
}
