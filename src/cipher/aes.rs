//! AES (FIPS 197) in a constant-time, bit-sliced rendition.
//!
//! AES works on 128-bit blocks and supports key sizes of 128, 192, and 256
//! bits. Each round substitutes every state byte through a non-linear S-box
//! (SubBytes), permutes the state (ShiftRows), mixes its columns over
//! GF(2⁸) (MixColumns), and XORs in a round key derived from the cipher key
//! (AddRoundKey).
//!
//! The textbook way to implement SubBytes is a 256-entry lookup table. A
//! table indexed by a secret byte leaks that byte through the data cache:
//! which line the load touches, and therefore how long it takes, depends on
//! the secret. This module never indexes memory with secret data. Instead
//! the 128-bit state lives in eight 16-bit words, word *i* holding bit *i*
//! of all sixteen state bytes, so that every AES transformation becomes a
//! fixed sequence of word-parallel Boolean operations applied identically to
//! all byte lanes at once. The S-box is evaluated as an actual Boolean
//! circuit (see [`sbox`]), the linear layers become shift-and-mask shuffles
//! (see [`state`]), and the whole cipher runs the same instruction stream
//! for every key and every block.
//!
//! Decryption uses the straight inverse cipher: the same round keys as
//! encryption, applied in reverse with the inverse transformations. Inside
//! the loop the round key is added *before* un-mixing the columns; that
//! ordering is what lets one schedule serve both directions, where most
//! implementations store a second, transformed schedule instead.

use {
    super::{BlockCipher, BlockDecrypt, BlockEncrypt},
    crate::{Ciphertext, Key, Plaintext},
    state::State,
    std::fmt,
};

pub(crate) mod sbox;
pub(crate) mod schedule;
pub(crate) mod state;

/// AES block size in bytes.
const BLOCK_BYTES: usize = 16;

const AES128_NK: usize = 4;
const AES128_NR: usize = 10;
const AES128_KEY_BYTES: usize = AES128_NK * 4;
const AES128_ROUND_KEYS: usize = AES128_NR + 1;

const AES192_NK: usize = 6;
const AES192_NR: usize = 12;
const AES192_KEY_BYTES: usize = AES192_NK * 4;
const AES192_ROUND_KEYS: usize = AES192_NR + 1;

const AES256_NK: usize = 8;
const AES256_NR: usize = 14;
const AES256_KEY_BYTES: usize = AES256_NK * 4;
const AES256_ROUND_KEYS: usize = AES256_NR + 1;

/// [AES](self) with 128-bit keys.
#[derive(Clone)]
pub struct Aes128 {
    schedule: [State; AES128_ROUND_KEYS],
}

impl BlockCipher for Aes128 {
    type Block = [u8; BLOCK_BYTES];
    type Key = [u8; AES128_KEY_BYTES];

    fn new(key: Key<Self::Key>) -> Self {
        Self {
            schedule: schedule::expand::<AES128_NK, AES128_KEY_BYTES, AES128_ROUND_KEYS>(key.0),
        }
    }
}

impl BlockEncrypt for Aes128 {
    type EncryptionBlock = [u8; BLOCK_BYTES];

    fn encrypt(&self, data: Plaintext<Self::EncryptionBlock>) -> Ciphertext<Self::EncryptionBlock> {
        Ciphertext(encrypt(&self.schedule, data.0))
    }
}

impl BlockDecrypt for Aes128 {
    type DecryptionBlock = [u8; BLOCK_BYTES];

    fn decrypt(&self, data: Ciphertext<Self::DecryptionBlock>) -> Plaintext<Self::DecryptionBlock> {
        Plaintext(decrypt(&self.schedule, data.0))
    }
}

impl fmt::Debug for Aes128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The schedule is key material and must not reach a formatter.
        f.debug_struct("Aes128").finish_non_exhaustive()
    }
}

/// [AES](self) with 192-bit keys.
#[derive(Clone)]
pub struct Aes192 {
    schedule: [State; AES192_ROUND_KEYS],
}

impl BlockCipher for Aes192 {
    type Block = [u8; BLOCK_BYTES];
    type Key = [u8; AES192_KEY_BYTES];

    fn new(key: Key<Self::Key>) -> Self {
        Self {
            schedule: schedule::expand::<AES192_NK, AES192_KEY_BYTES, AES192_ROUND_KEYS>(key.0),
        }
    }
}

impl BlockEncrypt for Aes192 {
    type EncryptionBlock = [u8; BLOCK_BYTES];

    fn encrypt(&self, data: Plaintext<Self::EncryptionBlock>) -> Ciphertext<Self::EncryptionBlock> {
        Ciphertext(encrypt(&self.schedule, data.0))
    }
}

impl BlockDecrypt for Aes192 {
    type DecryptionBlock = [u8; BLOCK_BYTES];

    fn decrypt(&self, data: Ciphertext<Self::DecryptionBlock>) -> Plaintext<Self::DecryptionBlock> {
        Plaintext(decrypt(&self.schedule, data.0))
    }
}

impl fmt::Debug for Aes192 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aes192").finish_non_exhaustive()
    }
}

/// [AES](self) with 256-bit keys.
#[derive(Clone)]
pub struct Aes256 {
    schedule: [State; AES256_ROUND_KEYS],
}

impl BlockCipher for Aes256 {
    type Block = [u8; BLOCK_BYTES];
    type Key = [u8; AES256_KEY_BYTES];

    fn new(key: Key<Self::Key>) -> Self {
        Self {
            schedule: schedule::expand::<AES256_NK, AES256_KEY_BYTES, AES256_ROUND_KEYS>(key.0),
        }
    }
}

impl BlockEncrypt for Aes256 {
    type EncryptionBlock = [u8; BLOCK_BYTES];

    fn encrypt(&self, data: Plaintext<Self::EncryptionBlock>) -> Ciphertext<Self::EncryptionBlock> {
        Ciphertext(encrypt(&self.schedule, data.0))
    }
}

impl BlockDecrypt for Aes256 {
    type DecryptionBlock = [u8; BLOCK_BYTES];

    fn decrypt(&self, data: Ciphertext<Self::DecryptionBlock>) -> Plaintext<Self::DecryptionBlock> {
        Plaintext(decrypt(&self.schedule, data.0))
    }
}

impl fmt::Debug for Aes256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aes256").finish_non_exhaustive()
    }
}

/// The cipher of FIPS 197 section 5.1, over a pre-expanded schedule.
///
/// The input block is sliced into registers before any output is produced,
/// and every round applies the same fixed sequence of word operations; round
/// count is the only thing that varies between key sizes.
fn encrypt<const ROUND_KEYS: usize>(
    schedule: &[State; ROUND_KEYS],
    data: [u8; BLOCK_BYTES],
) -> [u8; BLOCK_BYTES] {
    let rounds = ROUND_KEYS - 1;
    let mut state = State::from_bytes(&data);
    state ^= &schedule[0];
    for round in 1..rounds {
        state.sub_bytes();
        state.shift_rows();
        state.mix_columns();
        state ^= &schedule[round];
    }
    state.sub_bytes();
    state.shift_rows();
    state ^= &schedule[rounds];
    state.to_bytes()
}

/// The inverse cipher of FIPS 197 section 5.3, over the same schedule as
/// [`encrypt`].
///
/// This is the straight inverse cipher, not the equivalent one: the round
/// key is added before InvMixColumns inside the loop, which is exactly what
/// makes the untransformed schedule reusable for decryption.
fn decrypt<const ROUND_KEYS: usize>(
    schedule: &[State; ROUND_KEYS],
    data: [u8; BLOCK_BYTES],
) -> [u8; BLOCK_BYTES] {
    let rounds = ROUND_KEYS - 1;
    let mut state = State::from_bytes(&data);
    state ^= &schedule[rounds];
    for round in (1..rounds).rev() {
        state.inv_shift_rows();
        state.inv_sub_bytes();
        state ^= &schedule[round];
        state.inv_mix_columns();
    }
    state.inv_shift_rows();
    state.inv_sub_bytes();
    state ^= &schedule[0];
    state.to_bytes()
}
