use services::QuestionPrompt;

/// Display-ready lines for one question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub header: String,
    pub timer: Option<String>,
    pub text: String,
    pub options: Vec<String>,
    pub hint: &'static str,
}

impl From<&QuestionPrompt<'_>> for QuestionVm {
    fn from(prompt: &QuestionPrompt<'_>) -> Self {
        let question = prompt.question;
        let hint = if question.is_multi_select() {
            "Your answer (option numbers, comma-separated): "
        } else {
            "Your answer: "
        };
        Self {
            header: format!(
                "{} | Question {}/{}",
                prompt.mode, prompt.number, prompt.total
            ),
            timer: prompt.remaining.map(|r| format!("Time left: {r}")),
            text: question.text().to_owned(),
            options: question
                .options()
                .iter()
                .enumerate()
                .map(|(idx, option)| format!("   {idx}) {option}"))
                .collect(),
            hint,
        }
    }
}
