//! Exercise definitions - catalog types, identity and the built-in exercise base

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Muscle categories the catalog can be browsed by
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Abdominals,
    Biceps,
    Calves,
    Chest,
    Forearms,
    Glutes,
    Hamstrings,
    Lats,
    LowerBack,
    MiddleBack,
    Neck,
    Quadriceps,
    Traps,
    Triceps,
}

impl MuscleGroup {
    /// Catalog key, as used in exercise records
    pub fn key(&self) -> &'static str {
        match self {
            MuscleGroup::Abdominals => "abdominals",
            MuscleGroup::Biceps => "biceps",
            MuscleGroup::Calves => "calves",
            MuscleGroup::Chest => "chest",
            MuscleGroup::Forearms => "forearms",
            MuscleGroup::Glutes => "glutes",
            MuscleGroup::Hamstrings => "hamstrings",
            MuscleGroup::Lats => "lats",
            MuscleGroup::LowerBack => "lower_back",
            MuscleGroup::MiddleBack => "middle_back",
            MuscleGroup::Neck => "neck",
            MuscleGroup::Quadriceps => "quadriceps",
            MuscleGroup::Traps => "traps",
            MuscleGroup::Triceps => "triceps",
        }
    }

    /// All muscle groups for iteration
    pub fn all() -> &'static [MuscleGroup] {
        &[
            MuscleGroup::Abdominals,
            MuscleGroup::Biceps,
            MuscleGroup::Calves,
            MuscleGroup::Chest,
            MuscleGroup::Forearms,
            MuscleGroup::Glutes,
            MuscleGroup::Hamstrings,
            MuscleGroup::Lats,
            MuscleGroup::LowerBack,
            MuscleGroup::MiddleBack,
            MuscleGroup::Neck,
            MuscleGroup::Quadriceps,
            MuscleGroup::Traps,
            MuscleGroup::Triceps,
        ]
    }
}

impl FromStr for MuscleGroup {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace([' ', '-'], "_");
        MuscleGroup::all()
            .iter()
            .copied()
            .find(|m| m.key() == key)
            .ok_or_else(|| CatalogError::UnknownMuscle(s.to_string()))
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Expert => "expert",
        }
    }
}

impl FromStr for Difficulty {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "expert" => Ok(Difficulty::Expert),
            _ => Err(CatalogError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Exercise as supplied by a catalog. Read-only for the rest of the app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    /// Category, e.g. "strength", "cardio", "stretching"
    #[serde(rename = "type")]
    pub kind: String,
    pub muscle: String,
    pub equipment: String,
    pub difficulty: Difficulty,
    pub instructions: String,
}

impl Exercise {
    /// Stable deduplication key, see [`exercise_id`]
    pub fn id(&self) -> String {
        exercise_id(&self.name, &self.muscle, &self.kind)
    }
}

/// Identity of an exercise: `name-muscle-type`, lower-cased, whitespace runs
/// collapsed to a single hyphen. Equipment, difficulty and instructions are
/// deliberately not part of the key.
pub fn exercise_id(name: &str, muscle: &str, kind: &str) -> String {
    [name, muscle, kind]
        .iter()
        .map(|part| {
            part.split_whitespace()
                .map(str::to_lowercase)
                .collect::<Vec<_>>()
                .join("-")
        })
        .collect::<Vec<_>>()
        .join("-")
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("exercise record is missing field `{0}`")]
    MissingField(&'static str),
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
    #[error("unknown muscle group: {0}")]
    UnknownMuscle(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Exercise record as it arrives from an external source. Nothing is trusted
/// until it has been converted into an [`Exercise`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawExercise {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub muscle: Option<String>,
    pub equipment: Option<String>,
    pub difficulty: Option<String>,
    pub instructions: Option<String>,
}

impl TryFrom<RawExercise> for Exercise {
    type Error = CatalogError;

    fn try_from(raw: RawExercise) -> Result<Self, Self::Error> {
        let difficulty = raw
            .difficulty
            .ok_or(CatalogError::MissingField("difficulty"))?
            .parse::<Difficulty>()?;
        Ok(Exercise {
            name: raw.name.ok_or(CatalogError::MissingField("name"))?,
            kind: raw.kind.ok_or(CatalogError::MissingField("type"))?,
            muscle: raw.muscle.ok_or(CatalogError::MissingField("muscle"))?,
            // Optional in upstream data
            equipment: raw.equipment.unwrap_or_default(),
            difficulty,
            instructions: raw.instructions.unwrap_or_default(),
        })
    }
}

/// Read-only exercise source
pub trait ExerciseCatalog {
    fn all(&self) -> Vec<Exercise>;

    fn by_muscle(&self, muscle: MuscleGroup) -> Vec<Exercise> {
        self.all()
            .into_iter()
            .filter(|e| e.muscle.parse::<MuscleGroup>().ok() == Some(muscle))
            .collect()
    }

    fn by_type(&self, kind: &str) -> Vec<Exercise> {
        self.all()
            .into_iter()
            .filter(|e| e.kind.eq_ignore_ascii_case(kind))
            .collect()
    }

    fn by_difficulty(&self, difficulty: Difficulty) -> Vec<Exercise> {
        self.all()
            .into_iter()
            .filter(|e| e.difficulty == difficulty)
            .collect()
    }

    /// Find exercise by identity (for matching favorites back to the catalog)
    fn find(&self, id: &str) -> Option<Exercise> {
        self.all().into_iter().find(|e| e.id() == id)
    }
}

struct BuiltinExercise {
    name: &'static str,
    kind: &'static str,
    muscle: MuscleGroup,
    equipment: &'static str,
    difficulty: Difficulty,
    instructions: &'static str,
}

/// Built-in exercise base, used when no catalog file is configured
const BUILTIN_EXERCISES: &[BuiltinExercise] = &[
    BuiltinExercise {
        name: "Push-ups",
        kind: "strength",
        muscle: MuscleGroup::Chest,
        equipment: "body_only",
        difficulty: Difficulty::Beginner,
        instructions: "Hands under shoulders, body in a straight line. Lower until the chest nearly touches the floor, then press back up.",
    },
    BuiltinExercise {
        name: "Dumbbell Bench Press",
        kind: "strength",
        muscle: MuscleGroup::Chest,
        equipment: "dumbbell",
        difficulty: Difficulty::Intermediate,
        instructions: "Lie on a flat bench with a dumbbell in each hand. Press up until the arms are extended, lower with control.",
    },
    BuiltinExercise {
        name: "Plank",
        kind: "strength",
        muscle: MuscleGroup::Abdominals,
        equipment: "body_only",
        difficulty: Difficulty::Beginner,
        instructions: "Rest on forearms and toes, keep hips level and hold the position.",
    },
    BuiltinExercise {
        name: "Hanging Leg Raise",
        kind: "strength",
        muscle: MuscleGroup::Abdominals,
        equipment: "other",
        difficulty: Difficulty::Expert,
        instructions: "Hang from a bar, raise straight legs to hip height, lower slowly without swinging.",
    },
    BuiltinExercise {
        name: "Hammer Curl",
        kind: "strength",
        muscle: MuscleGroup::Biceps,
        equipment: "dumbbell",
        difficulty: Difficulty::Beginner,
        instructions: "Hold dumbbells with palms facing in and curl to the shoulders, elbows fixed at the sides.",
    },
    BuiltinExercise {
        name: "Standing Calf Raise",
        kind: "strength",
        muscle: MuscleGroup::Calves,
        equipment: "body_only",
        difficulty: Difficulty::Beginner,
        instructions: "Stand on the edge of a step, rise onto the toes and lower below step level.",
    },
    BuiltinExercise {
        name: "Wrist Curl",
        kind: "strength",
        muscle: MuscleGroup::Forearms,
        equipment: "barbell",
        difficulty: Difficulty::Beginner,
        instructions: "Forearms on the thighs, palms up. Curl the bar using only the wrists.",
    },
    BuiltinExercise {
        name: "Glute Bridge",
        kind: "strength",
        muscle: MuscleGroup::Glutes,
        equipment: "body_only",
        difficulty: Difficulty::Beginner,
        instructions: "Lie on the back with knees bent, drive the hips up by squeezing the glutes.",
    },
    BuiltinExercise {
        name: "Romanian Deadlift",
        kind: "strength",
        muscle: MuscleGroup::Hamstrings,
        equipment: "barbell",
        difficulty: Difficulty::Intermediate,
        instructions: "Hinge at the hips with a slight knee bend, lower the bar along the legs, keep the back flat.",
    },
    BuiltinExercise {
        name: "Pull-up",
        kind: "strength",
        muscle: MuscleGroup::Lats,
        equipment: "body_only",
        difficulty: Difficulty::Intermediate,
        instructions: "Hang with an overhand grip, pull until the chin clears the bar.",
    },
    BuiltinExercise {
        name: "Superman",
        kind: "stretching",
        muscle: MuscleGroup::LowerBack,
        equipment: "body_only",
        difficulty: Difficulty::Beginner,
        instructions: "Lie face down, lift arms and legs off the floor together, hold briefly.",
    },
    BuiltinExercise {
        name: "Inverted Row",
        kind: "strength",
        muscle: MuscleGroup::MiddleBack,
        equipment: "body_only",
        difficulty: Difficulty::Beginner,
        instructions: "Hang under a low bar with straight body, pull the chest to the bar.",
    },
    BuiltinExercise {
        name: "Neck Side Stretch",
        kind: "stretching",
        muscle: MuscleGroup::Neck,
        equipment: "body_only",
        difficulty: Difficulty::Beginner,
        instructions: "Tilt the head toward one shoulder and hold, then switch sides.",
    },
    BuiltinExercise {
        name: "Bodyweight Squat",
        kind: "strength",
        muscle: MuscleGroup::Quadriceps,
        equipment: "body_only",
        difficulty: Difficulty::Beginner,
        instructions: "Feet shoulder width apart, sit back until thighs are parallel, stand up.",
    },
    BuiltinExercise {
        name: "Jumping Jacks",
        kind: "cardio",
        muscle: MuscleGroup::Quadriceps,
        equipment: "body_only",
        difficulty: Difficulty::Beginner,
        instructions: "Jump feet apart while raising the arms overhead, return and repeat.",
    },
    BuiltinExercise {
        name: "Dumbbell Shrug",
        kind: "strength",
        muscle: MuscleGroup::Traps,
        equipment: "dumbbell",
        difficulty: Difficulty::Beginner,
        instructions: "Hold dumbbells at the sides and raise the shoulders toward the ears.",
    },
    BuiltinExercise {
        name: "Bench Dips",
        kind: "strength",
        muscle: MuscleGroup::Triceps,
        equipment: "body_only",
        difficulty: Difficulty::Beginner,
        instructions: "Hands on a bench behind you, lower by bending the elbows, press back up.",
    },
];

impl BuiltinExercise {
    fn to_exercise(&self) -> Exercise {
        Exercise {
            name: self.name.to_string(),
            kind: self.kind.to_string(),
            muscle: self.muscle.key().to_string(),
            equipment: self.equipment.to_string(),
            difficulty: self.difficulty,
            instructions: self.instructions.to_string(),
        }
    }
}

/// Catalog backed by the compiled-in exercise base
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl ExerciseCatalog for BuiltinCatalog {
    fn all(&self) -> Vec<Exercise> {
        BUILTIN_EXERCISES.iter().map(BuiltinExercise::to_exercise).collect()
    }
}

/// Catalog loaded from a JSON array of exercise records
#[derive(Debug, Clone, Default)]
pub struct JsonCatalog {
    exercises: Vec<Exercise>,
}

impl JsonCatalog {
    /// Parse and validate every record; a single bad record rejects the file
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawExercise> = serde_json::from_str(json)?;
        let exercises = raw
            .into_iter()
            .map(Exercise::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { exercises })
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}

impl ExerciseCatalog for JsonCatalog {
    fn all(&self) -> Vec<Exercise> {
        self.exercises.clone()
    }
}

#[cfg(test)]
pub(crate) fn sample_exercise(name: &str, muscle: &str, kind: &str) -> Exercise {
    Exercise {
        name: name.to_string(),
        kind: kind.to_string(),
        muscle: muscle.to_string(),
        equipment: "body_only".to_string(),
        difficulty: Difficulty::Beginner,
        instructions: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_id_basic() {
        assert_eq!(
            exercise_id("Push Ups", "chest", "strength"),
            "push-ups-chest-strength"
        );
    }

    #[test]
    fn test_exercise_id_collapses_whitespace_runs() {
        assert_eq!(
            exercise_id("Barbell   Bench\tPress", "chest", "strength"),
            "barbell-bench-press-chest-strength"
        );
    }

    #[test]
    fn test_exercise_id_case_and_space_insensitive() {
        let a = sample_exercise("Push Ups", "Chest", "Strength");
        let b = sample_exercise("push  ups", "chest", "STRENGTH");
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn test_exercise_id_ignores_other_fields() {
        let a = sample_exercise("Plank", "abdominals", "strength");
        let mut b = a.clone();
        b.equipment = "mat".to_string();
        b.instructions = "Hold it".to_string();
        b.difficulty = Difficulty::Expert;
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn test_exercise_id_distinguishes_muscle() {
        let a = sample_exercise("Stretch", "neck", "stretching");
        let b = sample_exercise("Stretch", "calves", "stretching");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_exercise_id_trims_each_field() {
        assert_eq!(
            exercise_id(" Plank ", " abdominals", "strength "),
            "plank-abdominals-strength"
        );
        assert_eq!(
            exercise_id("\tSide  Plank", "abdominals", "strength"),
            exercise_id("Side Plank", "abdominals", "strength")
        );
    }

    #[test]
    fn test_exercise_id_empty_fields() {
        assert_eq!(exercise_id("", "", ""), "--");
    }

    #[test]
    fn test_muscle_group_parse() {
        assert_eq!("lower_back".parse::<MuscleGroup>().unwrap(), MuscleGroup::LowerBack);
        assert_eq!("Middle Back".parse::<MuscleGroup>().unwrap(), MuscleGroup::MiddleBack);
        assert!("wings".parse::<MuscleGroup>().is_err());
    }

    #[test]
    fn test_muscle_group_keys_roundtrip() {
        for group in MuscleGroup::all() {
            assert_eq!(group.key().parse::<MuscleGroup>().unwrap(), *group);
        }
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("Expert".parse::<Difficulty>().unwrap(), Difficulty::Expert);
        assert!("legendary".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_exercise_serializes_type_field() {
        let ex = sample_exercise("Plank", "abdominals", "strength");
        let json = serde_json::to_value(&ex).unwrap();
        assert_eq!(json["type"], "strength");
        assert_eq!(json["difficulty"], "beginner");
    }

    #[test]
    fn test_raw_exercise_missing_name_rejected() {
        let raw = RawExercise {
            kind: Some("strength".into()),
            muscle: Some("chest".into()),
            difficulty: Some("beginner".into()),
            ..Default::default()
        };
        let err = Exercise::try_from(raw).unwrap_err();
        assert!(matches!(err, CatalogError::MissingField("name")));
    }

    #[test]
    fn test_json_catalog_parses_records() {
        let json = r#"[
            {"name": "Push-ups", "type": "strength", "muscle": "chest",
             "equipment": "body_only", "difficulty": "beginner", "instructions": "Push."},
            {"name": "Curl", "type": "strength", "muscle": "biceps",
             "difficulty": "intermediate"}
        ]"#;
        let catalog = JsonCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.by_muscle(MuscleGroup::Biceps)[0].equipment, "");
    }

    #[test]
    fn test_json_catalog_rejects_bad_difficulty() {
        let json = r#"[{"name": "X", "type": "cardio", "muscle": "calves", "difficulty": "hard"}]"#;
        assert!(matches!(
            JsonCatalog::from_json(json),
            Err(CatalogError::UnknownDifficulty(_))
        ));
    }

    #[test]
    fn test_builtin_catalog_covers_every_muscle() {
        let catalog = BuiltinCatalog;
        for group in MuscleGroup::all() {
            assert!(
                !catalog.by_muscle(*group).is_empty(),
                "No exercises for {}",
                group
            );
        }
    }

    #[test]
    fn test_builtin_catalog_ids_unique() {
        let ids: std::collections::HashSet<_> =
            BuiltinCatalog.all().iter().map(Exercise::id).collect();
        assert_eq!(ids.len(), BuiltinCatalog.all().len());
    }

    #[test]
    fn test_catalog_queries() {
        let catalog = BuiltinCatalog;
        assert!(catalog.by_type("CARDIO").iter().all(|e| e.kind == "cardio"));
        assert!(
            catalog
                .by_difficulty(Difficulty::Expert)
                .iter()
                .any(|e| e.name == "Hanging Leg Raise")
        );
        let plank = catalog.find("plank-abdominals-strength").unwrap();
        assert_eq!(plank.name, "Plank");
    }
}
