#[cfg(test)]
mod test;

mod cipher;
mod data;

pub use {
    cipher::{Aes128, Aes192, Aes256, BlockCipher, BlockDecrypt, BlockEncrypt},
    data::{Ciphertext, Key, Plaintext},
};
