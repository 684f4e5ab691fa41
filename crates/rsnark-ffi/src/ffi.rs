// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! `extern "C"` entry points.
//!
//! Thin wrappers over [`crate::abi`]. Sizes cross the boundary as `u64`,
//! text inputs as NUL-terminated UTF-8. A panic inside a call is caught and
//! reported as the `ERROR` status with a message.

use std::{
    any::Any,
    ffi::{c_char, CStr},
    panic::{catch_unwind, AssertUnwindSafe},
    path::Path,
};

use tracing_subscriber::EnvFilter;

use crate::{abi, buffer::write_message, AbiError, ProverStatus, VerifierStatus};

/// # Safety
/// `ptr` must be null or valid for `len` bytes for the returned lifetime.
unsafe fn input<'a>(ptr: *const u8, len: u64) -> Option<&'a [u8]> {
    if ptr.is_null() {
        return (len == 0).then_some(&[][..]);
    }
    Some(std::slice::from_raw_parts(ptr, usize::try_from(len).ok()?))
}

/// # Safety
/// `ptr` must be null or valid for writes of `len` bytes.
unsafe fn output<'a>(ptr: *mut u8, len: u64) -> &'a mut [u8] {
    match usize::try_from(len) {
        Ok(len) if !ptr.is_null() && len > 0 => std::slice::from_raw_parts_mut(ptr, len),
        _ => &mut [][..],
    }
}

/// # Safety
/// `ptr` must be null or point to a NUL-terminated string.
unsafe fn text<'a>(ptr: *const c_char) -> Result<&'a str, AbiError> {
    if ptr.is_null() {
        return Err(AbiError::InvalidArgument("null string"));
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map_err(|_| AbiError::InvalidArgument("string is not UTF-8"))
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// # Safety
/// Both pointers must be null or valid for reads.
unsafe fn prove_sizes(proof_size: *mut u64, public_size: *mut u64) -> Result<(usize, usize), AbiError> {
    if proof_size.is_null() || public_size.is_null() {
        return Err(AbiError::InvalidArgument("null size pointer"));
    }
    let proof = usize::try_from(*proof_size).map_err(|_| AbiError::InvalidArgument("proof size"))?;
    let public = usize::try_from(*public_size).map_err(|_| AbiError::InvalidArgument("public size"))?;
    Ok((proof, public))
}

enum ZkeyArg<'a> {
    Bytes(&'a [u8]),
    Path(&'a Path),
}

#[allow(clippy::too_many_arguments)]
unsafe fn prove_c(
    zkey: Result<ZkeyArg<'_>, AbiError>,
    wtns_buffer: *const u8,
    wtns_size: u64,
    proof_buffer: *mut u8,
    proof_size: *mut u64,
    public_buffer: *mut u8,
    public_size: *mut u64,
    error_msg: *mut u8,
    error_msg_max_size: u64,
) -> i32 {
    let error_buf = output(error_msg, error_msg_max_size);
    let result = catch_unwind(AssertUnwindSafe(|| -> Result<ProverStatus, AbiError> {
        let zkey = zkey?;
        let wtns = input(wtns_buffer, wtns_size).ok_or(AbiError::InvalidArgument("witness buffer"))?;
        let (mut proof_cap, mut public_cap) = prove_sizes(proof_size, public_size)?;
        let proof_buf = output(proof_buffer, proof_cap as u64);
        let public_buf = output(public_buffer, public_cap as u64);

        let status = match zkey {
            ZkeyArg::Bytes(bytes) => abi::groth16_prove(
                bytes,
                wtns,
                proof_buf,
                &mut proof_cap,
                public_buf,
                &mut public_cap,
                &mut *error_buf,
            ),
            ZkeyArg::Path(path) => abi::groth16_prove_zkey_file(
                path,
                wtns,
                proof_buf,
                &mut proof_cap,
                public_buf,
                &mut public_cap,
                &mut *error_buf,
            ),
        };
        *proof_size = proof_cap as u64;
        *public_size = public_cap as u64;
        Ok(status)
    }));

    let err = match result {
        Ok(Ok(status)) => return status.code(),
        Ok(Err(err)) => err,
        Err(payload) => AbiError::Panic(panic_message(payload)),
    };
    tracing::warn!(%err, "prove call rejected");
    write_message(error_buf, &err.to_string());
    ProverStatus::Error.code()
}

/// Prove with an in-memory zkey. Returns a `ProverStatus` code.
///
/// # Safety
/// Every pointer must be null or valid for its stated size; `proof_size`
/// and `public_size` must be valid for reads and writes.
#[no_mangle]
pub unsafe extern "C" fn groth16_prove(
    zkey_buffer: *const u8,
    zkey_size: u64,
    wtns_buffer: *const u8,
    wtns_size: u64,
    proof_buffer: *mut u8,
    proof_size: *mut u64,
    public_buffer: *mut u8,
    public_size: *mut u64,
    error_msg: *mut u8,
    error_msg_max_size: u64,
) -> i32 {
    let zkey = input(zkey_buffer, zkey_size)
        .map(ZkeyArg::Bytes)
        .ok_or(AbiError::InvalidArgument("zkey buffer"));
    prove_c(
        zkey,
        wtns_buffer,
        wtns_size,
        proof_buffer,
        proof_size,
        public_buffer,
        public_size,
        error_msg,
        error_msg_max_size,
    )
}

/// Prove with the zkey streamed from a file path.
///
/// # Safety
/// As [`groth16_prove`]; `zkey_path` must be a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn groth16_prove_zkey_file(
    zkey_path: *const c_char,
    wtns_buffer: *const u8,
    wtns_size: u64,
    proof_buffer: *mut u8,
    proof_size: *mut u64,
    public_buffer: *mut u8,
    public_size: *mut u64,
    error_msg: *mut u8,
    error_msg_max_size: u64,
) -> i32 {
    let zkey = text(zkey_path).map(|p| ZkeyArg::Path(Path::new(p)));
    prove_c(
        zkey,
        wtns_buffer,
        wtns_size,
        proof_buffer,
        proof_size,
        public_buffer,
        public_size,
        error_msg,
        error_msg_max_size,
    )
}

/// Returns a `VerifierStatus` code.
///
/// # Safety
/// The three inputs must be NUL-terminated strings; `error_msg` must be
/// null or valid for `error_msg_max_size` bytes.
#[no_mangle]
pub unsafe extern "C" fn groth16_verify(
    proof: *const c_char,
    inputs: *const c_char,
    verification_key: *const c_char,
    error_msg: *mut u8,
    error_msg_max_size: u64,
) -> i32 {
    let result = catch_unwind(AssertUnwindSafe(|| -> Result<VerifierStatus, AbiError> {
        let (proof, inputs, vk) = (text(proof)?, text(inputs)?, text(verification_key)?);
        Ok(abi::groth16_verify(proof, inputs, vk, output(error_msg, error_msg_max_size)))
    }));
    let err = match result {
        Ok(Ok(status)) => return status.code(),
        Ok(Err(err)) => err,
        Err(payload) => AbiError::Panic(panic_message(payload)),
    };
    write_message(output(error_msg, error_msg_max_size), &err.to_string());
    VerifierStatus::Error.code()
}

/// Public-signals buffer size for an in-memory zkey; 0 on error.
///
/// # Safety
/// `zkey_buffer` must be valid for `zkey_size` bytes; `error_msg` must be
/// null or valid for `error_msg_max_size` bytes.
#[no_mangle]
pub unsafe extern "C" fn groth16_public_size_for_zkey_buf(
    zkey_buffer: *const u8,
    zkey_size: u64,
    error_msg: *mut u8,
    error_msg_max_size: u64,
) -> u64 {
    let result = catch_unwind(AssertUnwindSafe(|| -> Result<usize, AbiError> {
        let zkey = input(zkey_buffer, zkey_size).ok_or(AbiError::InvalidArgument("zkey buffer"))?;
        Ok(abi::groth16_public_size_for_zkey_buf(zkey, output(error_msg, error_msg_max_size)))
    }));
    size_or_report(result, error_msg, error_msg_max_size)
}

/// Public-signals buffer size for a zkey file; 0 on error.
///
/// # Safety
/// `zkey_path` must be a NUL-terminated string; `error_msg` must be null or
/// valid for `error_msg_max_size` bytes.
#[no_mangle]
pub unsafe extern "C" fn groth16_public_size_for_zkey_file(
    zkey_path: *const c_char,
    error_msg: *mut u8,
    error_msg_max_size: u64,
) -> u64 {
    let result = catch_unwind(AssertUnwindSafe(|| -> Result<usize, AbiError> {
        let path = Path::new(text(zkey_path)?);
        Ok(abi::groth16_public_size_for_zkey_file(path, output(error_msg, error_msg_max_size)))
    }));
    size_or_report(result, error_msg, error_msg_max_size)
}

unsafe fn size_or_report(
    result: std::thread::Result<Result<usize, AbiError>>,
    error_msg: *mut u8,
    error_msg_max_size: u64,
) -> u64 {
    let err = match result {
        Ok(Ok(size)) => return size as u64,
        Ok(Err(err)) => err,
        Err(payload) => AbiError::Panic(panic_message(payload)),
    };
    write_message(output(error_msg, error_msg_max_size), &err.to_string());
    0
}

/// Proof buffer capacity that always fits, NUL included.
#[no_mangle]
pub extern "C" fn groth16_proof_size() -> u64 {
    abi::groth16_proof_size() as u64
}

/// Install a `tracing` subscriber filtered by `RUST_LOG`. Returns 0 when
/// installed, 1 when a global subscriber already exists.
#[no_mangle]
pub extern "C" fn rsnark_setup_tracing() -> i32 {
    let installed = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
    match installed {
        Ok(()) => 0,
        Err(_) => 1,
    }
}
