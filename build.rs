use csv::StringRecord;
use std::{
    fmt::Display,
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::PathBuf,
};

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct Country {
    code: String,
    name: String,
}

pub fn is_country_enabled(code: &str) -> bool {
    let feature = format!("CARGO_FEATURE_{code}");
    std::env::var(&feature).is_ok()
}

impl Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Country::{}", self.code)
    }
}

fn parse_country_row(row: StringRecord) -> Country {
    let mut it = row.iter().map(|it| it.trim().to_string());
    Country {
        code: it.next().expect("invalid row in countries.csv"),
        name: it.next().expect("invalid row in countries.csv"),
    }
}

fn gen_country_enum_decl<'a, W: Write, C: Iterator<Item = &'a Country>>(
    out: &mut W,
    countries: C,
) -> std::io::Result<()> {
    let mut reverse_lookup = phf_codegen::Map::<&str>::new();

    out.write_all(b"declare_countries![\n")?;
    for c in countries {
        writeln!(out, "{0}: \"{0}\" \"{1}\",", c.code, c.name)?;
        reverse_lookup.entry(c.code.as_str(), c.to_string());
    }
    out.write_all(b"];\n")?;

    writeln!(
        out,
        "pub(crate) static CODE_TO_COUNTRY: phf::Map<&'static str, Country> = {};",
        reverse_lookup.build()
    )?;

    Ok(())
}

fn main() {
    let root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").unwrap());
    let countries_path = root.join("countries.csv");
    println!("cargo:rerun-if-changed={}", countries_path.display());

    let mut countries: Vec<Country> = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(BufReader::new(match File::open(&countries_path) {
            Ok(it) => it,
            Err(_) => {
                panic!("missing {}", countries_path.display())
            }
        }))
        .records()
        .filter_map(Result::ok)
        .map(parse_country_row)
        .filter(|it| is_country_enabled(&it.code))
        .collect();
    countries.sort();
    countries.dedup_by(|a, b| a.code == b.code);

    let out_dir = PathBuf::from(&std::env::var("OUT_DIR").unwrap());
    let countries_out = out_dir.join("decl_countries.rs");
    let mut countries_out =
        BufWriter::new(File::create(countries_out).expect("unable to create decl_countries.rs"));
    gen_country_enum_decl(&mut countries_out, countries.iter()).unwrap();
}
