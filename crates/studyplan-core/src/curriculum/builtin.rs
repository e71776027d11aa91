//! Built-in grade tables.

use super::{GradeEntry, PriorityTier, Subject};

use super::PriorityTier::{High, Low, Medium};

/// `(id, name, tier, weekly hours, difficulty, enabled)`
type Row = (&'static str, &'static str, PriorityTier, f64, u8, bool);

const GRADE_6: &[Row] = &[
    ("lingua_portuguesa", "Língua Portuguesa", High, 5.0, 3, true),
    ("matematica", "Matemática", High, 5.0, 3, true),
    ("ciencias", "Ciências da Natureza", High, 3.0, 2, true),
    ("historia", "História", Medium, 2.0, 2, true),
    ("geografia", "Geografia", Medium, 2.0, 2, true),
    ("lingua_inglesa", "Língua Inglesa", Medium, 2.0, 2, true),
    ("ensino_religioso", "Ensino Religioso", Low, 1.0, 1, false),
];

const GRADE_7: &[Row] = &[
    ("lingua_portuguesa", "Língua Portuguesa", High, 5.0, 3, true),
    ("matematica", "Matemática", High, 5.0, 4, true),
    ("ciencias", "Ciências da Natureza", High, 3.0, 3, true),
    ("historia", "História", Medium, 2.0, 2, true),
    ("geografia", "Geografia", Medium, 2.0, 2, true),
    ("lingua_inglesa", "Língua Inglesa", Medium, 2.0, 3, true),
    ("ensino_religioso", "Ensino Religioso", Low, 1.0, 1, false),
];

const GRADE_8: &[Row] = &[
    ("lingua_portuguesa", "Língua Portuguesa", High, 5.0, 4, true),
    ("matematica", "Matemática", High, 5.0, 4, true),
    ("ciencias", "Ciências da Natureza", High, 3.0, 4, true),
    ("historia", "História", Medium, 2.0, 3, true),
    ("geografia", "Geografia", Medium, 2.0, 3, true),
    ("lingua_inglesa", "Língua Inglesa", Medium, 2.0, 3, true),
    ("ensino_religioso", "Ensino Religioso", Low, 1.0, 1, false),
];

const GRADE_9: &[Row] = &[
    ("lingua_portuguesa", "Língua Portuguesa", High, 5.0, 4, true),
    ("matematica", "Matemática", High, 5.0, 5, true),
    ("ciencias", "Ciências da Natureza", High, 3.0, 4, true),
    ("historia", "História", Medium, 2.0, 3, true),
    ("geografia", "Geografia", Medium, 2.0, 3, true),
    ("lingua_inglesa", "Língua Inglesa", Medium, 2.0, 4, true),
    ("ensino_religioso", "Ensino Religioso", Low, 1.0, 1, false),
];

const MEDIO_1: &[Row] = &[
    ("lingua_portuguesa", "Língua Portuguesa", High, 5.0, 4, true),
    ("matematica", "Matemática", High, 5.0, 5, true),
    ("fisica", "Física", High, 3.0, 5, true),
    ("quimica", "Química", High, 3.0, 5, true),
    ("biologia", "Biologia", High, 3.0, 4, true),
    ("historia", "História", Medium, 2.0, 3, true),
    ("geografia", "Geografia", Medium, 2.0, 3, true),
    ("lingua_inglesa", "Língua Inglesa", Medium, 2.0, 3, true),
    ("filosofia", "Filosofia", Low, 1.0, 2, false),
    ("sociologia", "Sociologia", Low, 1.0, 2, false),
];

const MEDIO_2: &[Row] = &[
    ("lingua_portuguesa", "Língua Portuguesa", High, 5.0, 5, true),
    ("matematica", "Matemática", High, 5.0, 5, true),
    ("fisica", "Física", High, 3.0, 5, true),
    ("quimica", "Química", High, 3.0, 5, true),
    ("biologia", "Biologia", High, 3.0, 4, true),
    ("historia", "História", Medium, 2.0, 4, true),
    ("geografia", "Geografia", Medium, 2.0, 4, true),
    ("lingua_inglesa", "Língua Inglesa", Medium, 2.0, 4, true),
    ("filosofia", "Filosofia", Low, 1.0, 3, false),
    ("sociologia", "Sociologia", Low, 1.0, 3, false),
];

const MEDIO_3: &[Row] = &[
    ("lingua_portuguesa", "Língua Portuguesa", High, 6.0, 5, true),
    ("matematica", "Matemática", High, 6.0, 5, true),
    ("fisica", "Física", High, 4.0, 5, true),
    ("quimica", "Química", High, 4.0, 5, true),
    ("biologia", "Biologia", High, 4.0, 5, true),
    ("historia", "História", Medium, 3.0, 4, true),
    ("geografia", "Geografia", Medium, 3.0, 4, true),
    ("lingua_inglesa", "Língua Inglesa", Medium, 2.0, 4, true),
    ("filosofia", "Filosofia", Low, 2.0, 3, false),
    ("sociologia", "Sociologia", Low, 2.0, 3, false),
    ("redacao", "Redação", High, 3.0, 4, true),
];

fn entry(code: &str, label: &str, rows: &[Row]) -> GradeEntry {
    GradeEntry {
        code: code.to_string(),
        label: label.to_string(),
        subjects: rows
            .iter()
            .map(|&(id, name, tier, hours, difficulty, enabled)| Subject {
                id: id.to_string(),
                name: name.to_string(),
                weekly_hours: hours,
                priority_tier: tier,
                difficulty,
                enabled,
            })
            .collect(),
    }
}

pub(super) fn grades() -> Vec<GradeEntry> {
    vec![
        entry("6-ano", "6º ano", GRADE_6),
        entry("7-ano", "7º ano", GRADE_7),
        entry("8-ano", "8º ano", GRADE_8),
        entry("9-ano", "9º ano", GRADE_9),
        entry("1-medio", "1º ano", MEDIO_1),
        entry("2-medio", "2º ano", MEDIO_2),
        entry("3-medio", "3º ano", MEDIO_3),
    ]
}
