/// Cipher key material.
///
/// The wrapped type fixes the key length: a [`crate::Aes128`] key is
/// `Key<[u8; 16]>`, and handing it a 24-byte array is a type error rather
/// than something to check at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key<T>(pub T);

/// An unencrypted block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plaintext<T>(pub T);

/// An encrypted block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ciphertext<T>(pub T);
