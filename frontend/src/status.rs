//! Taxonomy of the backend's status strings.
//!
//! The backend reports progress through a small set of literal strings
//! plus two open-ended families ("Timeout…", "Erro…"). Each family is
//! parsed into a closed enum with an explicit [`Unrecognized`] bucket,
//! so an unexpected string degrades to an unstyled cell instead of
//! silently picking up the wrong class.
//!
//! [`Unrecognized`]: SearchBarStatus::Unrecognized

/// Status of locating the site's search field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchBarStatus {
    Found,
    NotFound,
    Timeout,
    Failed,
    Processing,
    Unrecognized,
}

impl SearchBarStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Campo de busca encontrado" => SearchBarStatus::Found,
            "Campo de busca não encontrado" => SearchBarStatus::NotFound,
            "Processando..." => SearchBarStatus::Processing,
            _ if raw.starts_with("Timeout") => SearchBarStatus::Timeout,
            _ if raw.starts_with("Erro") => SearchBarStatus::Failed,
            _ => SearchBarStatus::Unrecognized,
        }
    }

    /// CSS class of the table cell, `None` for unrecognized values.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            SearchBarStatus::Found => Some("success"),
            SearchBarStatus::NotFound | SearchBarStatus::Timeout => Some("warning"),
            SearchBarStatus::Failed => Some("error"),
            SearchBarStatus::Processing => Some("processing"),
            SearchBarStatus::Unrecognized => None,
        }
    }
}

/// Status of searching the term through the located field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentStatus {
    TermFound,
    TermNotFound,
    SearchUnavailable,
    Timeout,
    Failed,
    Processing,
    Unrecognized,
}

impl ContentStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Termo encontrado" => ContentStatus::TermFound,
            "Termo não encontrado" => ContentStatus::TermNotFound,
            "Não foi possível realizar a busca" => ContentStatus::SearchUnavailable,
            "Processando..." => ContentStatus::Processing,
            _ if raw.starts_with("Timeout") => ContentStatus::Timeout,
            _ if raw.starts_with("Erro") => ContentStatus::Failed,
            _ => ContentStatus::Unrecognized,
        }
    }

    pub fn css_class(self) -> Option<&'static str> {
        match self {
            ContentStatus::TermFound => Some("success"),
            ContentStatus::TermNotFound
            | ContentStatus::SearchUnavailable
            | ContentStatus::Timeout => Some("warning"),
            ContentStatus::Failed => Some("error"),
            ContentStatus::Processing => Some("processing"),
            ContentStatus::Unrecognized => None,
        }
    }
}

/// Terminal status of a whole lookup, bucketed for the summary line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinalStatus {
    Done,
    FieldNotFound,
    Timeout,
    Failed,
    Other,
}

impl FinalStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Busca realizada" => FinalStatus::Done,
            "Campo de busca não encontrado" => FinalStatus::FieldNotFound,
            _ if raw.starts_with("Timeout") => FinalStatus::Timeout,
            _ if raw.starts_with("Erro") => FinalStatus::Failed,
            _ => FinalStatus::Other,
        }
    }
}

/// Per-bucket counts of terminal statuses, rendered once a run
/// completes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub success: usize,
    pub not_found: usize,
    pub timeout: usize,
    pub error: usize,
}

impl Summary {
    pub fn tally<'a>(statuses: impl IntoIterator<Item = &'a str>) -> Self {
        let mut summary = Summary::default();
        for status in statuses {
            match FinalStatus::parse(status) {
                FinalStatus::Done => summary.success += 1,
                FinalStatus::FieldNotFound => summary.not_found += 1,
                FinalStatus::Timeout => summary.timeout += 1,
                FinalStatus::Failed => summary.error += 1,
                FinalStatus::Other => {}
            }
        }
        summary
    }

    /// Completion line shown in the `status` element.
    pub fn headline(&self, verified: usize) -> String {
        format!(
            "Processamento concluído! {} sites verificados. \
             Sucessos: {}, Falhas: {}, Timeouts: {}, Erros: {}",
            verified, self.success, self.not_found, self.timeout, self.error
        )
    }
}
