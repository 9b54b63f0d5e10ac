use crate::ui::components::{ButtonSize, ButtonVariant, Icon, button_class};
use crate::ui::escape;

/// Shown when email or password is missing.
pub const MISSING_CREDENTIALS: &str = "Introduce tu email y contraseña.";

/// Sign-in or sign-up form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginMode {
    #[default]
    SignIn,
    SignUp,
}

impl LoginMode {
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("signup") => Self::SignUp,
            _ => Self::SignIn,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SignIn => "signin",
            Self::SignUp => "signup",
        }
    }
}

/// Values echoed back into the form when it is re-rendered.
#[derive(Debug, Clone, Default)]
pub struct LoginForm<'a> {
    pub mode: LoginMode,
    pub email: &'a str,
    pub name: &'a str,
    pub error: Option<&'a str>,
}

fn field(label: &str, icon: Icon, input: &str) -> String {
    format!(
        r#"<label class="field"><span>{label}</span><span class="input-wrap">{}{input}</span></label>"#,
        icon.svg("icon-sm field-icon")
    )
}

#[must_use]
pub fn render(form: &LoginForm<'_>) -> String {
    let sign_up = form.mode == LoginMode::SignUp;
    let (heading, subheading, submit) = if sign_up {
        (
            "Crear cuenta",
            "Comienza tu viaje hacia el bienestar",
            "Crear cuenta",
        )
    } else {
        (
            "Bienvenido de nuevo",
            "Continúa cuidando tu salud mental",
            "Iniciar sesión",
        )
    };
    let (switch_prompt, switch_label, switch_href) = if sign_up {
        ("¿Ya tienes cuenta?", "Inicia sesión", "/login")
    } else {
        ("¿No tienes cuenta?", "Regístrate", "/login?mode=signup")
    };

    let name_field = if sign_up {
        field(
            "Nombre",
            Icon::User,
            &format!(
                r#"<input type="text" name="name" value="{}" placeholder="Tu nombre" autocomplete="name">"#,
                escape(form.name)
            ),
        )
    } else {
        String::new()
    };
    let forgot = if sign_up {
        ""
    } else {
        r##"<a href="#" class="link small">¿Olvidaste tu contraseña?</a>"##
    };
    let error = form.error.map_or_else(String::new, |e| {
        format!(r#"<p class="error" role="alert">{}</p>"#, escape(e))
    });

    format!(
        r#"<div class="view login fade-in">
    <div class="login-panel">
        <a href="/" class="back-link">{back}<span>Volver</span></a>
        <div class="login-heading">
            <span class="hero-badge emoji">🧘</span>
            <h1>{heading}</h1>
            <p class="muted">{subheading}</p>
        </div>
        <form method="post" action="/login" class="login-form" data-login-form>
            <input type="hidden" name="mode" value="{mode}">
            <div class="card stack">
                {name_field}
                {email_field}
                {password_field}
                {forgot}
            </div>
            {error}
            <button type="submit" class="{submit_class}" data-busy-label="{busy}">{submit}</button>
        </form>
        <p class="switch muted">{switch_prompt} <a href="{switch_href}" class="link strong">{switch_label}</a></p>
    </div>
</div>"#,
        back = Icon::ArrowLeft.svg("icon-sm"),
        mode = form.mode.as_str(),
        email_field = field(
            "Email",
            Icon::Mail,
            &format!(
                r#"<input type="email" name="email" value="{}" placeholder="tu@email.com" autocomplete="email" required>"#,
                escape(form.email)
            ),
        ),
        password_field = field(
            "Contraseña",
            Icon::Lock,
            &format!(
                r#"<input type="password" name="password" placeholder="••••••••" autocomplete="current-password" required><button type="button" class="reveal" data-toggle-password aria-label="Mostrar contraseña">{}</button>"#,
                Icon::Eye.svg("icon-sm")
            ),
        ),
        submit_class = button_class(ButtonVariant::Gradient, ButtonSize::Lg, "w-full"),
        busy = if sign_up {
            "Creando cuenta..."
        } else {
            "Iniciando sesión..."
        },
    )
}
