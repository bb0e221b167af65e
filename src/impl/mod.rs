// Crate-internal.
// ---

pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod config_ron_datasource;
        pub(crate) mod snapshot_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod account_model;
        pub(crate) mod config_model;
        pub(crate) mod iso_date_model;
        pub(crate) mod procedure_record_model;
    }
    pub(crate) mod repositories {
        pub(crate) mod accounts_repository_impl;
        pub(crate) mod procedures_repository_impl;
    }
    pub(crate) mod seed;
}

pub(crate) mod domain {
    pub(crate) mod entities {
        pub(crate) mod account;
        pub(crate) mod aggregates;
        pub(crate) mod config;
        pub(crate) mod filter_state;
        pub(crate) mod handlers;
        pub(crate) mod mutation;
        pub(crate) mod procedure;
        pub(crate) mod session;
    }
    pub(crate) mod logic {
        pub(crate) mod aggregation_engine;
        pub(crate) mod filter_predicate;
    }
    pub(crate) mod repositories {
        pub(crate) mod accounts_repository;
        pub(crate) mod procedures_repository;
    }
    pub(crate) mod usecases {
        pub(crate) mod auth_usecase;
        pub(crate) mod dashboard_usecase;
    }
}

pub(crate) mod presentation {
    pub(crate) mod csv_exporter;
    pub(crate) mod currency_codec;
    pub(crate) mod report_printer;
    pub(crate) mod utils;
}

// Public exports.
// ---

#[doc(hidden)]
#[allow(unused_imports)]
pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod entities {
        pub use crate::domain::entities::account::*;
        pub use crate::domain::entities::aggregates::*;
        pub use crate::domain::entities::config::*;
        pub use crate::domain::entities::filter_state::*;
        pub use crate::domain::entities::handlers::*;
        pub use crate::domain::entities::mutation::*;
        pub use crate::domain::entities::procedure::*;
        pub use crate::domain::entities::session::*;
    }

    pub mod presentation {
        pub use crate::presentation::currency_codec::CurrencyCodec;
        pub use crate::presentation::utils::{format_date, format_date_short, format_month};
    }
}
