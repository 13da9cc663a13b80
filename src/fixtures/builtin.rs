//! Reference fixtures: one per built-in classifier

use super::Fixture;

fn fixture(name: &str, groups: &[&[&str]], expected: f64) -> Fixture {
    Fixture {
        name: name.to_string(),
        groups: groups
            .iter()
            .map(|group| group.iter().map(|word| word.to_string()).collect())
            .collect(),
        expected,
    }
}

/// The reference suite, in its canonical order
pub fn builtin() -> Vec<Fixture> {
    vec![
        // "eeeppp" fails, "blablablaa" passes
        fixture(
            "vowels_consonants",
            &[
                &["aabbb", "ebep", "blablablaa", "hijk", "wsww"],
                &["abba", "eeeppp", "cocor", "ppppppaa", "qwerty", "acasq"],
                &["lalala", "lalal", "papapa", "papap"],
            ],
            2.33,
        ),
        fixture(
            "palindrome",
            &[
                &["a1551a", "parc", "ana", "minim", "1pcl3"],
                &["calabalac", "tivit", "leu", "zece10", "ploaie", "9ana9"],
                &["lalalal", "tema", "papa", "ger"],
            ],
            2.33,
        ),
        fixture(
            "gibberish",
            &[
                &["apap", "paprc", "apnap", "mipnipm", "copil"],
                &["cepr", "program", "lepu", "zepcep", "golang", "tema"],
                &["par", "impar", "papap", "gepr"],
            ],
            3.0,
        ),
        fixture(
            "vowel_start_end",
            &[
                &["ana", "parc", "impare", "era", "copil"],
                &["cer", "program", "leu", "alee", "golang", "info"],
                &["inima", "impar", "apa", "eleve"],
            ],
            2.66,
        ),
        fixture(
            "anagram_with_facultate",
            &[
                &["acultatef", "parc", "cultateaf", "faculatet", "copil"],
                &["cer", "tatefacul", "leu", "alee", "golang", "ultatefac"],
                &["tefaculta", "impar", "apa", "eleve"],
            ],
            2.00,
        ),
        fixture(
            "upper_start_end",
            &[
                &["AcasA", "CasA", "FacultatE", "SisTemE", "distribuite"],
                &["GolanG", "map", "reduce", "Problema", "TemA", "ProieCt"],
                &["LicentA", "semestru", "ALGORitM", "StuDent"],
            ],
            1.66,
        ),
        fixture(
            "contains_diacritics",
            &[
                &["țânțar", "carte", "ulcior", "copac", "plante"],
                &["beci", "", "mlăștinos", "astronaut", "stele", "planete"],
                &["floare", "somn", "șosetă", "scârțar"],
            ],
            1.33,
        ),
        // foaie ~ ulzrv, carte ~ xzigv
        fixture(
            "has_substitution_pair",
            &[
                &["prajitura", "camion", "foaie", "liliac", "ulzrv"],
                &["carte", "trofeu", "xzigv", "laptop", "scris", "muzica"],
                &["pictura", "telefon", "parapanta", "catel"],
            ],
            1.33,
        ),
        fixture(
            "has_rhyme_pair",
            &[
                &["stele", "mele", "borcan", "vajnic", "strașnic"],
                &["crocodil", "garnisit", "mușețel", "făurit", "arhanghel", "noapte"],
                &["lampă", "sine", "cine", "toriște"],
            ],
            3.33,
        ),
        fixture(
            "alternant_vowel_consonant",
            &[
                &["caracatiță", "ceva", "saar", "aaastrfb", ""],
                &["aaabbbccc", "caporal", "ddanube", "jahfjksgfjhs", "ajsdas", "urs"],
                &["scoica", "coral", "arac", "karnak"],
            ],
            1.33,
        ),
        fixture(
            "strong_passwords",
            &[
                &["sadsa1@A", "cevaA!4", "saar", "aaastrfb", ""],
                &["aaabbbccc", "!Caporal1", "ddanube", "jahfjksgfjhs", "ajsdas", "urs"],
                &["scoica", "Coral!@12", "arac", "karnak"],
            ],
            1.33,
        ),
        fixture(
            "unix_paths",
            &[
                &["/dev/null", "/bin", "saar", "teme/scoala/2020", ""],
                &["proiect/tema", "/dev", "ddanube", "jahfjksgfjhs", "ajsdas", "urs"],
                &["scoica", "/teme/repos/git", "arac", "karnak"],
            ],
            1.33,
        ),
        fixture(
            "romanian_names",
            &[
                &["Popescu", "Ionescu", "Pop", "aaastrfb", ""],
                &["Nicolae", "Dumitrescu", "ddanube", "jahfjksgfjhs", "ajsdas", "urs"],
                &["Dumitru", "Angelescu", "arac", "karnak"],
            ],
            1.33,
        ),
        fixture(
            "fibonacci_numbers",
            &[
                &["12", "5", "6", "13", "7"],
                &["21", "20", "42", "43", "8", "38"],
                &["54", "55", "34", "100"],
            ],
            2.00,
        ),
        fixture(
            "three_set_bits",
            &[
                &["1", "13", "6", "7", "9"],
                &["19", "20", "43", "43", "21", "53"],
                &["54", "55", "28", "101"],
            ],
            1.66,
        ),
    ]
}
