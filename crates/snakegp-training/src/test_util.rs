use rand::RngCore;

/// Random source replaying a fixed cycle of unit values.
///
/// `rng.random::<f64>()` yields the next value of the cycle (values are
/// clamped into `[0, 1)`), which lets tests force every decision of the tree
/// operators.
#[derive(Debug, Clone)]
pub(crate) struct SequenceRng {
    values: Vec<f64>,
    next: usize,
}

impl SequenceRng {
    pub(crate) fn new(values: impl IntoIterator<Item = f64>) -> Self {
        let values: Vec<f64> = values.into_iter().collect();
        assert!(!values.is_empty());
        Self { values, next: 0 }
    }
}

impl RngCore for SequenceRng {
    #[expect(clippy::cast_possible_truncation)]
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn next_u64(&mut self) -> u64 {
        const ONE: u64 = 1 << 53;
        let value = self.values[self.next];
        self.next = (self.next + 1) % self.values.len();
        let mantissa = ((value.clamp(0.0, 1.0) * ONE as f64) as u64).min(ONE - 1);
        mantissa << 11
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}
