use error_stack::{Context, Report};

// Figment's error type buries the failing key and source behind its
// metadata; pull those out as printable attachments so a bad
// `vestibule.yml` or environment variable names itself in the report.
pub trait AttachFigmentError<T: Context> {
    fn attach_figment_error(self, err: figment::Error) -> Report<T>;
}

impl<T: Context> AttachFigmentError<T> for Report<T> {
    fn attach_figment_error(self, err: figment::Error) -> Report<T> {
        let mut this = self.attach_printable(err.kind.to_string());

        if let (Some(profile), Some(metadata)) = (&err.profile, &err.metadata) {
            if !err.path.is_empty() {
                let key = metadata.interpolate(profile, &err.path);
                this = this.attach_printable(format!("for key {key:?}"));
            }
        }

        if let Some(metadata) = &err.metadata {
            this = match &metadata.source {
                Some(source) => this.attach_printable(format!("in {source} {}", metadata.name)),
                None => this.attach_printable(format!("in {}", metadata.name)),
            };
        }

        this
    }
}
