use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};

use shapegen::{
    compile_language_data, compile_pair_tables, LanguageDataInputs, PairTableInputs,
};

const HELP: &str = "\
Usage: shapegen <command> [options...]

Commands:
  language-data   Generate the per-script likely-language and OpenType tag tables
      --cldr DIR        CLDR release checkout (common/main, common/supplemental)
      --icu DIR         ICU source checkout (source/common/unicode/uscript.h)
      --opentype DIR    lang-ietf-opentype checkout (lib/map.json)
      --ucd DIR         UCD directory (Scripts.txt, PropertyValueAliases.txt)
      --iso15924 FILE   ISO 15924 registry file
      --out FILE        Output artifact
  pairs           Generate the bracket/quote pairing tables
      --ucd DIR         UCD directory (also needs UnicodeData.txt)
      --out FILE        Output artifact

Options:
  -h, --help      Print help information
";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        eprint!("{HELP}");
        return Ok(());
    }

    let command: String = args.free_from_str().context("missing command; try --help")?;
    let (out, artifact) = match command.as_str() {
        "language-data" => {
            let inputs = LanguageDataInputs {
                cldr: args.value_from_os_str("--cldr", path_arg)?,
                icu: args.value_from_os_str("--icu", path_arg)?,
                opentype: args.value_from_os_str("--opentype", path_arg)?,
                ucd: args.value_from_os_str("--ucd", path_arg)?,
                iso15924: args.value_from_os_str("--iso15924", path_arg)?,
            };
            let out: PathBuf = args.value_from_os_str("--out", path_arg)?;
            reject_leftovers(args)?;
            (out, compile_language_data(&inputs)?)
        }
        "pairs" => {
            let inputs = PairTableInputs {
                ucd: args.value_from_os_str("--ucd", path_arg)?,
            };
            let out: PathBuf = args.value_from_os_str("--out", path_arg)?;
            reject_leftovers(args)?;
            (out, compile_pair_tables(&inputs)?)
        }
        other => bail!("unknown command `{other}`; try --help"),
    };

    fs::write(&out, artifact)
        .with_context(|| format!("failed to write `{}`", out.display()))?;
    println!("generated {}", out.display());
    Ok(())
}

fn path_arg(value: &OsStr) -> Result<PathBuf, &'static str> {
    Ok(value.into())
}

fn reject_leftovers(args: pico_args::Arguments) -> anyhow::Result<()> {
    let remaining = args.finish();
    if !remaining.is_empty() {
        bail!("unrecognized arguments: {remaining:?}");
    }
    Ok(())
}
