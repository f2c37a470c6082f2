/// Macro to help with defining bitset types
macro_rules! bitset_traits {
    ($name:ident) => {
        /// The set difference.
        impl std::ops::Sub for $name {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self::Output {
                Self {
                    bits: self.bits & !rhs.bits,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self { bits: 0 }
            }
        }
    };
}
pub(crate) use bitset_traits;
