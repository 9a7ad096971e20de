use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChoiceOption {
    pub value: f64,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputKind {
    Numeric {
        min: f64,
        max: f64,
        /// Increment hint for the input field; not enforced.
        step: Option<f64>,
        placeholder: &'static str,
    },
    Choice {
        options: &'static [ChoiceOption],
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Question {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub input: InputKind,
}

impl Question {
    /// Turns raw field text into an answer, checking presence and the
    /// declared bounds. Non-numeric text is rejected rather than forwarded.
    pub fn parse_input(&self, raw: &str) -> Result<f64, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Missing);
        }
        let value = trimmed
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| ValidationError::NotNumeric {
                input: trimmed.to_string(),
            })?;
        self.check_value(value)?;
        Ok(value)
    }

    pub fn check_value(&self, value: f64) -> Result<(), ValidationError> {
        match self.input {
            InputKind::Numeric { min, max, .. } => {
                if value < min || value > max {
                    return Err(ValidationError::OutOfRange { min, max });
                }
            }
            InputKind::Choice { options } => {
                if !options.iter().any(|option| option.value == value) {
                    return Err(ValidationError::UnknownOption { value });
                }
            }
        }
        Ok(())
    }

    pub fn options(&self) -> &'static [ChoiceOption] {
        match self.input {
            InputKind::Choice { options } => options,
            InputKind::Numeric { .. } => &[],
        }
    }

    pub fn option_label(&self, value: f64) -> Option<&'static str> {
        self.options()
            .iter()
            .find(|option| option.value == value)
            .map(|option| option.label)
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.input, InputKind::Choice { .. })
    }
}

/// Fixed, ordered question sequence. Order drives both the screens and the
/// positions in the feature vector.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    questions: &'static [Question],
}

impl Catalog {
    pub fn standard() -> Self {
        Self {
            questions: STANDARD_QUESTIONS,
        }
    }

    pub fn from_static(questions: &'static [Question]) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> &'static [Question] {
        self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'static Question> {
        self.questions.get(index)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.questions.iter().position(|question| question.id == id)
    }

    pub fn last_index(&self) -> usize {
        self.questions.len().saturating_sub(1)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

const SEX_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption {
        value: 1.0,
        label: "Male",
    },
    ChoiceOption {
        value: 0.0,
        label: "Female",
    },
];

const CHEST_PAIN_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption {
        value: 0.0,
        label: "Typical Angina - Chest pain related to the heart",
    },
    ChoiceOption {
        value: 1.0,
        label: "Atypical Angina - Chest pain that may not be heart-related",
    },
    ChoiceOption {
        value: 2.0,
        label: "Non-anginal Pain - Pain not related to angina",
    },
    ChoiceOption {
        value: 3.0,
        label: "Asymptomatic - No chest pain experienced",
    },
];

const STANDARD_QUESTIONS: &[Question] = &[
    Question {
        id: "age",
        label: "What is your current age?",
        description: "Please enter your age in years. This helps us understand your risk profile.",
        input: InputKind::Numeric {
            min: 1.0,
            max: 120.0,
            step: None,
            placeholder: "Enter your age",
        },
    },
    Question {
        id: "sex",
        label: "What is your biological sex?",
        description: "This information helps in assessing heart disease risk factors.",
        input: InputKind::Choice {
            options: SEX_OPTIONS,
        },
    },
    Question {
        id: "cp",
        label: "What type of chest pain do you experience?",
        description: "Chest pain type can be an important indicator. Please select the option \
                      that best describes your experience.",
        input: InputKind::Choice {
            options: CHEST_PAIN_OPTIONS,
        },
    },
    Question {
        id: "oldpeak",
        label: "ST Depression Value",
        description: "ST depression is measured during exercise stress tests. It indicates how \
                      much the ST segment of your ECG is depressed during exercise compared to \
                      rest. If you don't know this value, please consult your doctor or enter 0 \
                      if you haven't had this test.",
        input: InputKind::Numeric {
            min: 0.0,
            max: 10.0,
            step: Some(0.1),
            placeholder: "Enter value (e.g., 0.5)",
        },
    },
    Question {
        id: "thalach",
        label: "Maximum Heart Rate Achieved",
        description: "This is the highest heart rate you reached during physical activity or \
                      exercise. It's typically measured in beats per minute (BPM). A rough \
                      estimate: 220 minus your age gives an approximate maximum heart rate.",
        input: InputKind::Numeric {
            min: 60.0,
            max: 220.0,
            step: None,
            placeholder: "Enter heart rate (BPM)",
        },
    },
    Question {
        id: "chol",
        label: "Serum Cholesterol Level",
        description: "This is your total cholesterol level measured in milligrams per deciliter \
                      (mg/dL). Normal levels are typically below 200 mg/dL. You can find this on \
                      your recent blood test results.",
        input: InputKind::Numeric {
            min: 100.0,
            max: 600.0,
            step: None,
            placeholder: "Enter cholesterol (mg/dL)",
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use heartcheck_protocol::FEATURE_COUNT;

    #[test]
    fn standard_catalog_matches_feature_order() {
        let catalog = Catalog::standard();
        let ids: Vec<_> = catalog.questions().iter().map(|q| q.id).collect();
        assert_eq!(ids, ["age", "sex", "cp", "oldpeak", "thalach", "chol"]);
        assert_eq!(catalog.len(), FEATURE_COUNT);
        assert_eq!(catalog.last_index(), 5);
        assert_eq!(catalog.position("oldpeak"), Some(3));
        assert_eq!(catalog.position("bp"), None);
    }

    #[test]
    fn ids_are_unique() {
        let catalog = Catalog::standard();
        for (index, question) in catalog.questions().iter().enumerate() {
            assert_eq!(catalog.position(question.id), Some(index));
        }
    }

    #[test]
    fn numeric_input_checks_presence_and_range() {
        let age = Catalog::standard().get(0).unwrap();
        assert_eq!(age.parse_input(" 63 "), Ok(63.0));
        assert_eq!(age.parse_input("   "), Err(ValidationError::Missing));
        assert_eq!(
            age.parse_input("sixty"),
            Err(ValidationError::NotNumeric {
                input: "sixty".to_string()
            })
        );
        assert_eq!(
            age.parse_input("NaN"),
            Err(ValidationError::NotNumeric {
                input: "NaN".to_string()
            })
        );
        assert_eq!(
            age.parse_input("0"),
            Err(ValidationError::OutOfRange {
                min: 1.0,
                max: 120.0
            })
        );
        assert_eq!(age.parse_input("120"), Ok(120.0));
    }

    #[test]
    fn step_is_not_enforced() {
        let oldpeak = Catalog::standard().get(3).unwrap();
        assert_eq!(oldpeak.parse_input("2.35"), Ok(2.35));
    }

    #[test]
    fn choice_input_accepts_only_offered_codes() {
        let cp = Catalog::standard().get(2).unwrap();
        assert!(cp.is_choice());
        assert_eq!(cp.parse_input("3"), Ok(3.0));
        assert_eq!(
            cp.parse_input("4"),
            Err(ValidationError::UnknownOption { value: 4.0 })
        );
        assert_eq!(
            cp.option_label(1.0),
            Some("Atypical Angina - Chest pain that may not be heart-related")
        );
    }

    #[test]
    fn range_message_prints_whole_bounds() {
        let err = ValidationError::OutOfRange {
            min: 60.0,
            max: 220.0,
        };
        assert_eq!(err.to_string(), "value must be between 60 and 220");
    }
}
