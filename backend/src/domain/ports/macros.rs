//! `define_port_error!` generates `thiserror` enums for driven ports together
//! with snake_case constructors, so adapters can write
//! `UserPersistenceError::query("...")` instead of spelling out struct
//! variants.

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
    define_port_error! {
        pub enum ExampleStoreError {
            Unavailable { message: String } => "store unavailable: {message}",
            Rejected { status: u16 } => "store rejected write: {status}",
            Duplicate { key: String, attempts: u32 } => "duplicate {key} after {attempts} attempts",
            Closed => "store closed",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = ExampleStoreError::unavailable("refused");
        assert_eq!(err.to_string(), "store unavailable: refused");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        let err = ExampleStoreError::rejected(409_u16);
        assert_eq!(err.to_string(), "store rejected write: 409");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = ExampleStoreError::duplicate("stu01", 2_u32);
        assert_eq!(err.to_string(), "duplicate stu01 after 2 attempts");
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(ExampleStoreError::closed(), ExampleStoreError::Closed);
    }
}
