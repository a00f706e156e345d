//! Scoped flush-to-zero for the audio thread.
//!
//! Feedback networks decaying toward silence produce subnormal floats, which
//! are extremely slow on most CPUs. [`ScopedNoDenormals`] switches the FPU to
//! flush-to-zero for its lifetime and restores the previous control word on
//! drop. On architectures without a known control register it does nothing.

use core::marker::PhantomData;

#[cfg(target_arch = "x86_64")]
mod imp {
    use core::arch::asm;

    /// FTZ (bit 15) | DAZ (bit 6).
    pub const MASK: u32 = 0x8040;

    pub type ControlWord = u32;

    #[inline]
    pub fn read() -> ControlWord {
        let mut csr: u32 = 0;
        // SAFETY: stmxcsr stores the 32-bit MXCSR into a valid, aligned local.
        unsafe {
            asm!(
                "stmxcsr [{ptr}]",
                ptr = in(reg) &mut csr,
                options(nostack, preserves_flags),
            );
        }
        csr
    }

    #[inline]
    pub fn write(csr: ControlWord) {
        // SAFETY: ldmxcsr loads a value previously read from MXCSR with only
        // the FTZ/DAZ bits changed; both are defined on every x86_64 CPU.
        unsafe {
            asm!(
                "ldmxcsr [{ptr}]",
                ptr = in(reg) &csr,
                options(nostack, preserves_flags, readonly),
            );
        }
    }

    pub fn enable(csr: ControlWord) -> ControlWord {
        csr | MASK
    }

    pub fn is_enabled(csr: ControlWord) -> bool {
        csr & MASK == MASK
    }
}

#[cfg(target_arch = "aarch64")]
mod imp {
    use core::arch::asm;

    /// FZ, bit 24 of FPCR.
    pub const MASK: u64 = 1 << 24;

    pub type ControlWord = u64;

    #[inline]
    pub fn read() -> ControlWord {
        let fpcr: u64;
        // SAFETY: reading FPCR has no side effects.
        unsafe {
            asm!("mrs {}, fpcr", out(reg) fpcr, options(nomem, nostack, preserves_flags));
        }
        fpcr
    }

    #[inline]
    pub fn write(fpcr: ControlWord) {
        // SAFETY: writes back a value read from FPCR with only FZ changed.
        unsafe {
            asm!("msr fpcr, {}", in(reg) fpcr, options(nomem, nostack, preserves_flags));
        }
    }

    pub fn enable(fpcr: ControlWord) -> ControlWord {
        fpcr | MASK
    }

    pub fn is_enabled(fpcr: ControlWord) -> bool {
        fpcr & MASK == MASK
    }
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
mod imp {
    pub type ControlWord = u32;

    pub fn read() -> ControlWord {
        0
    }

    pub fn write(_: ControlWord) {}

    pub fn enable(word: ControlWord) -> ControlWord {
        word
    }

    pub fn is_enabled(_: ControlWord) -> bool {
        false
    }
}

/// RAII guard: flush-to-zero while alive, previous FPU mode after drop.
///
/// The control register is per thread, so the guard is neither `Send` nor
/// `Sync`.
///
/// # Example
///
/// ```rust
/// use threeverb_processor::ScopedNoDenormals;
///
/// {
///     let _guard = ScopedNoDenormals::new();
///     // ... process audio ...
/// }
/// // previous mode restored here
/// ```
#[derive(Debug)]
pub struct ScopedNoDenormals {
    saved: imp::ControlWord,
    _not_send: PhantomData<*const ()>,
}

impl ScopedNoDenormals {
    /// Save the current FPU mode and enable flush-to-zero.
    #[inline]
    pub fn new() -> Self {
        let saved = imp::read();
        imp::write(imp::enable(saved));
        Self {
            saved,
            _not_send: PhantomData,
        }
    }
}

impl Default for ScopedNoDenormals {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ScopedNoDenormals {
    #[inline]
    fn drop(&mut self) {
        imp::write(self.saved);
    }
}

/// Whether flush-to-zero is active on the calling thread.
///
/// Always `false` on architectures the guard does not support.
pub fn flush_to_zero_enabled() -> bool {
    imp::is_enabled(imp::read())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_restores_previous_mode() {
        let before = imp::read();
        {
            let _guard = ScopedNoDenormals::new();
            if cfg!(any(target_arch = "x86_64", target_arch = "aarch64")) {
                assert!(flush_to_zero_enabled());
            }
        }
        assert_eq!(imp::read(), before);
    }

    #[test]
    fn nested_guards_unwind_in_order() {
        let before = imp::read();
        {
            let _outer = ScopedNoDenormals::new();
            let during = imp::read();
            {
                let _inner = ScopedNoDenormals::new();
            }
            assert_eq!(imp::read(), during);
        }
        assert_eq!(imp::read(), before);
    }

    #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
    #[test]
    fn subnormals_flush_inside_guard() {
        let tiny = core::hint::black_box(f32::MIN_POSITIVE);
        let _guard = ScopedNoDenormals::new();
        let product = core::hint::black_box(tiny) * core::hint::black_box(0.5f32);
        assert_eq!(product, 0.0);
    }
}
