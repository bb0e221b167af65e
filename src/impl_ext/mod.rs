// Crate-internal.
// ---

pub(crate) mod clocks;
pub(crate) mod credential_verifiers;
pub(crate) mod storage {
    pub(crate) mod file;
    pub(crate) mod memory;
}

// Public exports.
// ---

pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod clocks {
        pub use crate::impl_ext::clocks::*;
    }
    pub mod credential_verifiers {
        pub use crate::impl_ext::credential_verifiers::*;
    }
    pub mod storage {
        pub use crate::impl_ext::storage::file::*;
        pub use crate::impl_ext::storage::memory::*;
    }
}
