use gscp_store::Client;

/// Default bound on concurrent per-file copies in bulk operations.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Options shared by the copy operations.
#[derive(Clone)]
pub struct CopyOptions {
    /// Pre-built remote-store client. When absent and at least one endpoint
    /// is remote, a default client with ambient credentials is constructed
    /// once for the invocation and never cached across calls.
    pub client: Option<Client>,
    /// Suppress per-file progress events. Errors still propagate.
    pub quiet: bool,
    /// Upper bound on concurrent per-file copies in `copy_dir`/`copy_files`.
    pub concurrency: usize,
}

impl Default for CopyOptions {
    fn default() -> Self {
        CopyOptions {
            client: None,
            quiet: false,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl CopyOptions {
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}
