#[cfg(test)]
mod unit_tests {

    use crate::exemplar::{self, ExemplarError};
    use crate::icu::{IcuError, ScriptEnumeration};
    use crate::opentype::{ConditionFlags, OpenTypeError, OpenTypeTagMap};
    use crate::overrides::UNICODE7;
    use crate::pairs::{self, PairEnd, PairError};
    use crate::tag::Tag;
    use crate::ucd::{
        self, CodepointScripts, ScriptAliases, ScriptCode, ScriptRegistry,
    };

    fn script(code: &str) -> ScriptCode {
        ScriptCode::new(code).unwrap()
    }

    // ── tags ─────────────────────────────────────────────────────────────

    #[test]
    fn tag_packs_big_endian_with_space_padding() {
        assert_eq!(Tag::new("en").value(), 0x656E_2020);
        assert_eq!(Tag::new("Latn").value(), 0x4C61_746E);
        assert_eq!(Tag::DFLT, Tag::new("dflt"));
        assert_eq!(Tag::UNKNOWN.value(), 0);
    }

    #[test]
    fn tag_display_keeps_padding() {
        assert_eq!(Tag::new("en").to_string(), "en  ");
        assert_eq!(Tag::new("dflt").to_string(), "dflt");
    }

    // ── exemplar parsing ─────────────────────────────────────────────────

    #[test]
    fn range_expands_inclusively() {
        assert_eq!(exemplar::parse("[a-c]").unwrap(), ["a", "b", "c"]);
    }

    #[test]
    fn clusters_stay_whole_and_escapes_decode() {
        let raw = "[a {ch} \\u0301]";
        assert_eq!(exemplar::parse(raw).unwrap(), ["a", "ch", "\u{301}"]);
    }

    #[test]
    fn range_with_cluster_endpoint_is_fatal() {
        assert_eq!(
            exemplar::parse("[a-{bc}]").unwrap_err(),
            ExemplarError::InvalidRange("a".into(), "bc".into())
        );
    }

    #[test]
    fn outer_brackets_are_required() {
        assert!(matches!(
            exemplar::parse("abc"),
            Err(ExemplarError::NotBracketed(_))
        ));
    }

    #[test]
    fn hex_escapes_are_greedy_and_rangeable() {
        assert_eq!(exemplar::parse(r"[\u41]").unwrap(), ["A"]);
        assert_eq!(
            exemplar::parse(r"[\u0061-\u0063]").unwrap(),
            ["a", "b", "c"]
        );
    }

    #[test]
    fn escaped_dash_is_a_literal() {
        assert_eq!(exemplar::parse(r"[a\-b]").unwrap(), ["a", "-", "b"]);
    }

    #[test]
    fn empty_set_parses() {
        assert!(exemplar::parse("[]").unwrap().is_empty());
    }

    #[test]
    fn dangling_range_is_fatal() {
        assert_eq!(
            exemplar::parse("[a-]").unwrap_err(),
            ExemplarError::DanglingRange
        );
    }

    #[test]
    fn unterminated_cluster_is_fatal() {
        assert_eq!(
            exemplar::parse("[{ab]").unwrap_err(),
            ExemplarError::UnterminatedCluster
        );
    }

    #[test]
    fn inverted_range_covers_nothing() {
        assert!(exemplar::parse("[c-a]").unwrap().is_empty());
    }

    #[test]
    fn surrogate_escape_is_rejected() {
        assert_eq!(
            exemplar::parse(r"[\uD800]").unwrap_err(),
            ExemplarError::BadHexEscape("D800".into())
        );
    }

    // ── codepoint property index ─────────────────────────────────────────

    const ALIASES: &str = "\
# Script (sc)
sc ; Arab      ; Arabic
sc ; Latn      ; Latin
sc ; Tibt      ; Tibetan
sc ; Zyyy      ; Common
";

    const SCRIPTS: &str = "\
0041..005A    ; Latin # L&  [26] LATIN CAPITAL LETTER A..LATIN CAPITAL LETTER Z
0061..007A    ; Latin
0391..03A9    ; Greek
0028..0029    ; Common
0F3A          ; Tibetan
";

    fn codepoint_scripts() -> CodepointScripts {
        let aliases = ScriptAliases::parse(ALIASES).unwrap();
        CodepointScripts::parse(SCRIPTS, &aliases).unwrap()
    }

    #[test]
    fn script_ranges_expand_inclusively() {
        let scripts = codepoint_scripts();
        assert_eq!(scripts.script_of(0x41), Some(script("Latn")));
        assert_eq!(scripts.script_of(0x5A), Some(script("Latn")));
        assert_eq!(scripts.script_of(0x28), Some(script("Zyyy")));
        assert_eq!(scripts.script_of(0x20), None);
    }

    #[test]
    fn unknown_script_names_are_skipped_not_fatal() {
        // `Greek` has no alias in the fixture, so its range must vanish.
        let scripts = codepoint_scripts();
        assert_eq!(scripts.script_of(0x391), None);
    }

    #[test]
    fn later_script_entries_win() {
        let aliases = ScriptAliases::parse(ALIASES).unwrap();
        let contents = "0041..005A ; Latin\n0041 ; Arabic\n";
        let scripts = CodepointScripts::parse(contents, &aliases).unwrap();
        assert_eq!(scripts.script_of(0x41), Some(script("Arab")));
        assert_eq!(scripts.script_of(0x42), Some(script("Latn")));
    }

    #[test]
    fn bad_codepoint_range_is_fatal() {
        let aliases = ScriptAliases::parse(ALIASES).unwrap();
        assert!(CodepointScripts::parse("00GG ; Latin\n", &aliases).is_err());
        assert!(CodepointScripts::parse("0041\n", &aliases).is_err());
    }

    #[test]
    fn registry_finds_scripts_unused_in_properties() {
        let registry = ScriptRegistry::parse(
            "Latn;215;Latin;latin;1;2004-05-01\n\
             Tibt;330;Tibetan;tibétain;1;2004-05-01\n\
             Zxxx;997;Code for unwritten documents\n",
        )
        .unwrap();
        let unused = registry.unused_in_properties(&codepoint_scripts());
        assert!(unused.contains(&script("Zxxx")));
        assert!(!unused.contains(&script("Latn")));
        assert_eq!(registry.long_name(script("Latn")), Some("Latin"));
    }

    #[test]
    fn unicode_data_rows_parse() {
        let mut records = ucd::parse_unicode_data(
            "0028;LEFT PARENTHESIS;Ps;0;ON;;;;;Y;OPENING PARENTHESIS;;;;\n",
        );
        let record = records.next().unwrap().unwrap();
        assert_eq!(record.codepoint, 0x28);
        assert_eq!(record.name, "LEFT PARENTHESIS");
        assert_eq!(record.general_category, "Ps");
        assert!(records.next().is_none());
    }

    #[test]
    fn unicode_data_bad_codepoint_is_fatal() {
        let mut records = ucd::parse_unicode_data("ZZZZ;BAD;Xx\n");
        assert!(records.next().unwrap().is_err());
    }

    // ── ICU script enumeration ───────────────────────────────────────────

    const USCRIPT_HEADER: &str = "\
/* generated header, abridged */
typedef enum UScriptCode {
  /** @stable ICU 2.2 */
  USCRIPT_COMMON       =  0,  /* Zyyy */
  USCRIPT_INHERITED    =  1,  /* Zinh */
  USCRIPT_ARABIC       =  2,  /* Arab */
  USCRIPT_LATIN        =  3,  /* Latn */
  /** @internal */
  USCRIPT_CODE_LIMIT   =  4
} UScriptCode;
";

    #[test]
    fn script_enumeration_parses_in_index_order() {
        let scripts = ScriptEnumeration::parse(USCRIPT_HEADER).unwrap();
        assert_eq!(scripts.limit(), 4);
        assert_eq!(scripts.len(), 4);
        assert_eq!(scripts.entries()[0].constant, "USCRIPT_COMMON");
        assert_eq!(scripts.entries()[3].code, script("Latn"));
    }

    #[test]
    fn script_enumeration_gap_is_fatal() {
        let header = "\
typedef enum UScriptCode {
  USCRIPT_COMMON       =  0,  /* Zyyy */
  USCRIPT_ARABIC       =  2,  /* Arab */
  USCRIPT_CODE_LIMIT   =  3
} UScriptCode;
";
        assert!(matches!(
            ScriptEnumeration::parse(header),
            Err(IcuError::MissingIndex(1))
        ));
    }

    #[test]
    fn missing_enum_is_fatal() {
        assert!(matches!(
            ScriptEnumeration::parse("int x;\n"),
            Err(IcuError::EnumNotFound)
        ));
    }

    // ── OpenType tag map ─────────────────────────────────────────────────

    #[test]
    fn tag_map_splits_defaults_and_conditionals() {
        let map = OpenTypeTagMap::parse(
            r#"{"en": "ENG", "zh": ["ZHS", "Hant", "ZHT", "TW", "ZHH"]}"#,
        )
        .unwrap();
        assert_eq!(map.get("en").unwrap().default_tag, "ENG");
        let zh = map.get("zh").unwrap();
        assert_eq!(zh.default_tag, "ZHS");
        assert_eq!(
            zh.conditionals,
            vec![
                ("Hant".to_owned(), "ZHT".to_owned()),
                ("TW".to_owned(), "ZHH".to_owned())
            ]
        );
    }

    #[test]
    fn condition_flags_are_assigned_in_sorted_order() {
        let map = OpenTypeTagMap::parse(
            r#"{"zh": ["ZHS", "Hant", "ZHT", "TW", "ZHH"]}"#,
        )
        .unwrap();
        let flags = ConditionFlags::derive(&map).unwrap();
        assert_eq!(flags.names(), ["Hant", "TW"]);
        assert_eq!(flags.flag_of("Hant"), Some(1));
        assert_eq!(flags.flag_of("TW"), Some(2));
        assert_eq!(flags.flag_of("HK"), None);
    }

    #[test]
    fn dangling_condition_is_fatal() {
        assert!(matches!(
            OpenTypeTagMap::parse(r#"{"x": ["AAA", "cond"]}"#),
            Err(OpenTypeError::DanglingCondition(..))
        ));
    }

    #[test]
    fn more_than_32_conditions_fail_deterministically() {
        let entries: Vec<String> = (0..33)
            .map(|i| format!(r#""l{i:02}": ["AAA", "c{i:02}", "BBB"]"#))
            .collect();
        let map = OpenTypeTagMap::parse(&format!("{{{}}}", entries.join(","))).unwrap();
        assert!(matches!(
            ConditionFlags::derive(&map),
            Err(OpenTypeError::TooManyConditions(33))
        ));
    }

    // ── override tables ──────────────────────────────────────────────────

    #[test]
    fn composite_scripts_expand_and_variants_collapse() {
        let jpan: Vec<&str> = UNICODE7.scripts_used_as_properties("Jpan").into_vec();
        assert_eq!(jpan, ["Hani", "Hira", "Kana"]);
        let hant: Vec<&str> = UNICODE7.scripts_used_as_properties("Hant").into_vec();
        assert_eq!(hant, ["Hani"]);
        let latn: Vec<&str> = UNICODE7.scripts_used_as_properties("Latn").into_vec();
        assert_eq!(latn, ["Latn"]);
    }

    #[test]
    fn decompositions_and_variants_never_overlap() {
        for key in UNICODE7.script_decompositions.keys() {
            assert!(!UNICODE7.script_variants.contains_key(key));
        }
        for key in UNICODE7.script_variants.keys() {
            assert!(!UNICODE7.script_decompositions.contains_key(key));
        }
    }

    // ── punctuation pairing ──────────────────────────────────────────────

    const PUNCTUATION_DATA: &str = "\
0028;LEFT PARENTHESIS;Ps;0;ON;;;;;Y;OPENING PARENTHESIS;;;;
0029;RIGHT PARENTHESIS;Pe;0;ON;;;;;Y;CLOSING PARENTHESIS;;;;
003C;LESS-THAN SIGN;Sm;0;ON;;;;;Y;;;;;
003E;GREATER-THAN SIGN;Sm;0;ON;;;;;Y;;;;;
0041;LATIN CAPITAL LETTER A;Lu;0;L;;;;;N;;;0061;;0061
0F3A;TIBETAN MARK GUG RTAGS GYON;Ps;0;ON;;;;;Y;;;;;
2018;LEFT SINGLE QUOTATION MARK;Pi;0;ON;;;;;Y;SINGLE TURNED COMMA QUOTATION MARK;;;;
2019;RIGHT SINGLE QUOTATION MARK;Pf;0;ON;;;;;Y;SINGLE COMMA QUOTATION MARK;;;;
201A;SINGLE LOW-9 QUOTATION MARK;Ps;0;ON;;;;;Y;LOW SINGLE COMMA QUOTATION MARK;;;;
FE17;PRESENTATION FORM FOR VERTICAL LEFT WHITE LENTICULAR BRACKET;Ps;0;ON;<vertical> 3016;;;;N;;;;;
FE18;PRESENTATION FORM FOR VERTICAL RIGHT WHITE LENTICULAR BRAKCET;Pe;0;ON;<vertical> 3017;;;;N;;;;;
";

    fn punctuation_records() -> Vec<ucd::CharacterRecord> {
        ucd::parse_unicode_data(PUNCTUATION_DATA)
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn pair_resolution_buckets_and_sorts() {
        let records = punctuation_records();
        let resolution = pairs::resolve(&records, &codepoint_scripts(), &UNICODE7).unwrap();

        // Open plus ambiguous, ascending. The Tibetan bracket belongs to a
        // real script and the letter is not punctuation, so neither appears.
        assert_eq!(
            resolution.starts,
            [0x28, 0x3C, 0x2018, 0x2019, 0x201A, 0xFE17]
        );

        let expected = [
            (0x29, 0x28),
            (0x3E, 0x3C),
            (0x2018, 0x2019),
            (0x2018, 0x201A),
            (0x2019, 0x2018),
            (0x2019, 0x201A),
            (0xFE18, 0xFE17),
        ];
        let expected: Vec<PairEnd> = expected
            .iter()
            .map(|&(end, start)| PairEnd { end, start })
            .collect();
        assert_eq!(resolution.ends, expected);
    }

    #[test]
    fn angle_bracket_overrides_apply() {
        // `<` and `>` are Sm upstream; the override pairs them anyway, and
        // stripping LESS/GREATER lands both in the same group.
        let records = punctuation_records();
        let resolution = pairs::resolve(&records, &codepoint_scripts(), &UNICODE7).unwrap();
        assert!(resolution.starts.contains(&0x3C));
        assert!(resolution
            .ends
            .contains(&PairEnd { end: 0x3E, start: 0x3C }));
    }

    #[test]
    fn misspelled_bracket_groups_with_its_partner() {
        let records = punctuation_records();
        let resolution = pairs::resolve(&records, &codepoint_scripts(), &UNICODE7).unwrap();
        assert!(resolution
            .ends
            .contains(&PairEnd { end: 0xFE18, start: 0xFE17 }));
    }

    #[test]
    fn unpairable_open_codepoint_is_fatal() {
        let records: Vec<_> = ucd::parse_unicode_data(
            "2045;LEFT SQUARE BRACKET WITH QUILL;Ps;0;ON;;;;;Y;;;;;\n",
        )
        .collect::<Result<_, _>>()
        .unwrap();
        let err = pairs::resolve(&records, &codepoint_scripts(), &UNICODE7).unwrap_err();
        let PairError::Unpairable(unpairable) = err;
        assert_eq!(unpairable.codepoint, 0x2045);
        assert!(unpairable.to_string().contains("U+2045"));
    }

    #[test]
    fn unpairable_close_codepoint_is_fatal() {
        let records: Vec<_> = ucd::parse_unicode_data(
            "2046;RIGHT SQUARE BRACKET WITH QUILL;Pe;0;ON;;;;;Y;;;;;\n",
        )
        .collect::<Result<_, _>>()
        .unwrap();
        assert!(pairs::resolve(&records, &codepoint_scripts(), &UNICODE7).is_err());
    }
}
