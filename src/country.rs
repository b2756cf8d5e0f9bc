use crate::Error;

macro_rules! declare_countries {
    ($($code: ident: $str_code: literal $name: literal),* $(,)?) => {
        /// Two-letter country codes as specified by ISO 3166-1 alpha-2.
        ///
        /// Only the countries enabled through cargo features are present.
        #[allow(dead_code)]
        #[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
        pub enum Country {$(
            #[doc = $name]
            $code
        ),*}

        impl Country {
            /// Every enabled country, ordered by code.
            pub const ALL: &'static [Country] = &[$(
                Country::$code
            ),*];

            /// Two-letter code, as used by the holiday provider.
            pub const fn code(&self) -> &'static str {
                match *self {$(
                    Country::$code => $str_code
                ),*}
            }

            /// Long display name.
            pub const fn name(&self) -> &'static str {
                match *self {$(
                    Country::$code => $name
                ),*}
            }
        }
    };
}

include!(concat!(env!("OUT_DIR"), "/decl_countries.rs"));

impl std::str::FromStr for Country {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        CODE_TO_COUNTRY
            .get(code.as_str())
            .copied()
            .ok_or(Error::CountryNotAvailable)
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl AsRef<str> for Country {
    fn as_ref(&self) -> &str {
        self.code()
    }
}

#[cfg(all(test, feature = "all-countries"))]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("US".parse::<Country>().ok(), Some(Country::US));
        assert_eq!("jp".parse::<Country>().ok(), Some(Country::JP));
        assert_eq!(" ph ".parse::<Country>().ok(), Some(Country::PH));
    }

    #[test]
    fn rejects_unsupported_codes() {
        assert!(matches!("XX".parse::<Country>(), Err(Error::CountryNotAvailable)));
        assert!(matches!("".parse::<Country>(), Err(Error::CountryNotAvailable)));
    }

    #[test]
    fn all_is_sorted_and_round_trips() {
        assert_eq!(Country::ALL.len(), 7);
        assert!(Country::ALL.windows(2).all(|w| w[0].code() < w[1].code()));
        for c in Country::ALL {
            assert_eq!(c.code().parse::<Country>().ok(), Some(*c));
        }
    }

    #[test]
    fn names_and_display() {
        assert_eq!(Country::PH.name(), "Philippines");
        assert_eq!(Country::US.name(), "United States");
        assert_eq!(Country::DE.to_string(), "DE");
        assert_eq!(Country::FR.as_ref(), "FR");
    }
}
