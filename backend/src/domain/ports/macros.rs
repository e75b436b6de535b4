//! `define_port_error!` builds port error enums with `thiserror` messages and
//! snake_case constructors taking `impl Into<_>` field values.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    define_port_error! {
        pub enum ProbeError {
            Unreachable => "store unreachable",
            Rejected { reason: String } => "rejected: {reason}",
            Limited { reason: String, retries: u8 } => "limited: {reason} after {retries}",
        }
    }

    #[rstest]
    fn unit_variant_gets_snake_case_constructor() {
        assert_eq!(ProbeError::unreachable(), ProbeError::Unreachable);
        assert_eq!(ProbeError::unreachable().to_string(), "store unreachable");
    }

    #[rstest]
    fn string_fields_accept_borrowed_input() {
        let err = ProbeError::rejected("duplicate");
        assert_eq!(err.to_string(), "rejected: duplicate");
    }

    #[rstest]
    fn mixed_fields_keep_their_types() {
        let err = ProbeError::limited("busy", 3_u8);
        assert_eq!(err.to_string(), "limited: busy after 3");
    }
}
