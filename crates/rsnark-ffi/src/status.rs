// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

/// Prover call outcome. The discriminants are part of the ABI.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProverStatus {
    Ok = 0,
    Error = 1,
    ShortBuffer = 2,
    InvalidWitnessLength = 3,
}

/// Verifier call outcome. The discriminants are part of the ABI.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifierStatus {
    Valid = 0,
    Invalid = 1,
    Error = 2,
}

impl ProverStatus {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Ok),
            1 => Some(Self::Error),
            2 => Some(Self::ShortBuffer),
            3 => Some(Self::InvalidWitnessLength),
            _ => None,
        }
    }
}

impl VerifierStatus {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Valid),
            1 => Some(Self::Invalid),
            2 => Some(Self::Error),
            _ => None,
        }
    }
}
