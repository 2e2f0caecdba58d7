//! Follows the host's active context and keeps the resolved scheme in step.

use shortcuts_core::{CommandSource, Result, SchemeResolver, Scope, SetBindingOutcome};

/// Reports the host's active context, `None` when there is none.
pub trait ContextSource {
    fn active_context(&self) -> Option<String>;
}

impl<F> ContextSource for F
where
    F: Fn() -> Option<String>,
{
    fn active_context(&self) -> Option<String> {
        self()
    }
}

/// Host notifications the switcher reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SwitchEvent {
    /// A context became active.
    ContextActivated(String),
    /// A bindings editor was closed; re-resolve the active context.
    EditFinished,
}

pub struct ContextSwitcher<S, C> {
    resolver: SchemeResolver<S>,
    contexts: C,
}

impl<S: CommandSource, C: ContextSource> ContextSwitcher<S, C> {
    pub fn new(resolver: SchemeResolver<S>, contexts: C) -> Self {
        Self { resolver, contexts }
    }

    /// Resolve whatever context is active right now.
    pub fn start(&mut self) -> Result<Scope> {
        let scope = self.current_scope();
        tracing::debug!(scope = %scope, "starting context switcher");
        self.resolver.resolve(&scope)?;
        Ok(scope)
    }

    pub fn handle(&mut self, event: SwitchEvent) -> Result<Scope> {
        let scope = match event {
            SwitchEvent::ContextActivated(name) => scope_for(Some(name)),
            SwitchEvent::EditFinished => self.current_scope(),
        };
        self.resolver.resolve(&scope)?;
        Ok(scope)
    }

    /// Edit a binding in `scope`, which need not be the active context.
    ///
    /// Resolution stays on `scope` until the next event.
    pub fn set_binding(
        &mut self,
        scope: &Scope,
        command: &str,
        raw: &str,
    ) -> Result<SetBindingOutcome> {
        self.resolver.set_binding(scope, command, raw)
    }

    pub fn current_scope(&self) -> Scope {
        scope_for(self.contexts.active_context())
    }

    pub fn resolver(&self) -> &SchemeResolver<S> {
        &self.resolver
    }

    pub fn resolver_mut(&mut self) -> &mut SchemeResolver<S> {
        &mut self.resolver
    }

    pub fn into_resolver(self) -> SchemeResolver<S> {
        self.resolver
    }
}

fn scope_for(context: Option<String>) -> Scope {
    match context {
        Some(name) if !name.is_empty() => Scope::named(name),
        _ => Scope::Global,
    }
}
