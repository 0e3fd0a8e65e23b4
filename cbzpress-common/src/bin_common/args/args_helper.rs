/// Declares a group of related options.
///
/// ```text
/// args! {
///     #[derive(Clone)]
///     Name {
///         "help text" some_field: u32 = 5;
///         other_group: Other;
///     }
/// }
/// ```
///
/// creates `NameCli`, a clap argument group with one `--some-field` flag per field, and
/// `NameArgs`, the same options as a plain struct with a `Default` impl and builder
/// style setters. Groups declared with this macro can be nested, they are flattened on
/// the command line. The attributes in front of the name only go on `NameArgs`.
#[macro_export]
macro_rules! args {
    ($(#$argsmeta:tt)* $name:ident {
        $($fhelp:literal $fname:ident: $ftype:ty = $fdefault:expr;)*
        $($mname:ident: $mtype:ident;)*
    }) => {
        $crate::bin_common::args::args_helper::paste! {
            #[derive(clap::Args, Debug)]
            pub struct [<$name Cli>] {
                $(
                    #[arg(long, default_value_t = ($fdefault), help = $fhelp)]
                    $fname: $ftype,
                )*

                $(
                    #[command(flatten)]
                    $mname: [<$mtype Cli>],
                )*
            }

            $(#$argsmeta)*
            pub struct [<$name Args>] {
                $(
                    $fname: $ftype,
                )*

                $(
                    $mname: [<$mtype Args>],
                )*
            }

            impl std::default::Default for [<$name Args>] {
                fn default() -> Self {
                    Self {
                        $(
                            $fname: $fdefault,
                        )*

                        $(
                            $mname: [<$mtype Args>]::default(),
                        )*
                    }
                }
            }

            impl [<$name Args>] {
                $(
                    pub fn $fname(mut self, $fname: $ftype) -> Self {
                        self.$fname = $fname;
                        self
                    }
                )*

                $(
                    pub fn $mname(mut self, $mname: [<$mtype Args>]) -> Self {
                        self.$mname = $mname;
                        self
                    }
                )*
            }

            impl [<$name Cli>] {
                pub fn to_args(&self) -> [<$name Args>] {
                    [<$name Args>] {
                        $(
                            $fname: self.$fname.clone(),
                        )*

                        $(
                            $mname: self.$mname.to_args(),
                        )*
                    }
                }
            }
        }
    };
}

pub use args;
pub use paste::paste;
