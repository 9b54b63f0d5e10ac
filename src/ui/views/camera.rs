use crate::ui::components::{ButtonSize, ButtonVariant, Icon, button_class};
use crate::ui::escape;

/// Shown when the analysis of a submitted frame fails.
pub const ANALYSIS_FAILED: &str = "No se pudo analizar la imagen. Inténtalo de nuevo.";

/// Shown by the client script when `getUserMedia` is refused.
pub const CAMERA_DENIED: &str = "No se pudo acceder a la cámara. Por favor, permite el acceso.";

/// Photo capture view. Capture itself is driven by `/static/camera.js`.
#[must_use]
pub fn render(error: Option<&str>) -> String {
    let server_error = error.map_or_else(String::new, |e| {
        format!(r#"<p class="error" role="alert">{}</p>"#, escape(e))
    });
    let icon_lg = |variant| button_class(variant, ButtonSize::IconLg, "");

    format!(
        r#"<div class="view camera fade-in">
    <div class="camera-column">
        <div class="view-heading">
            <h2>Análisis por Foto</h2>
            <p class="muted">Toma una foto de tu rostro para analizar tu nivel de estrés</p>
        </div>

        <div class="camera-preview" data-camera>
            <div class="camera-idle" data-camera-idle>
                <span class="round-icon bg-lavender-light">{camera_icon}</span>
                <button type="button" class="{start_class}" data-camera-start>Activar cámara</button>
                <p class="error" data-camera-error hidden>{CAMERA_DENIED}</p>
                {server_error}
            </div>
            <video data-camera-video autoplay playsinline muted hidden></video>
            <img data-camera-photo alt="Captura" hidden>
            <div class="face-guide" data-camera-guide hidden><div></div></div>
            <div class="camera-busy" data-camera-busy hidden>
                {loader}
                <p>Analizando...</p>
            </div>
        </div>

        <canvas data-camera-canvas hidden></canvas>

        <form method="post" action="/camera/analyze" class="camera-actions" data-camera-form>
            <input type="hidden" name="image" data-camera-input>
            <div class="button-row" data-camera-live hidden>
                <button type="button" class="{outline}" data-camera-stop aria-label="Detener cámara">{x}</button>
                <button type="button" class="{gradient}" data-camera-shoot aria-label="Tomar foto">{shoot}</button>
            </div>
            <div class="button-row" data-camera-review hidden>
                <button type="button" class="{outline}" data-camera-retake aria-label="Repetir foto">{retake}</button>
                <button type="submit" class="{gradient}" data-camera-confirm aria-label="Analizar foto">{check}</button>
            </div>
        </form>
    </div>

    <aside class="camera-tips">
        <div class="card">
            <h4>Consejos para mejores resultados:</h4>
            <ul class="tips">
                <li>Asegúrate de tener buena iluminación</li>
                <li>Mantén tu rostro centrado en el marco</li>
                <li>Intenta mostrar una expresión natural</li>
            </ul>
        </div>
        <div class="card gradient-card desktop-only">
            <h4>¿Cómo funciona?</h4>
            <p class="muted small">Nuestro sistema analiza tus expresiones faciales para detectar signos de estrés y proporcionarte recomendaciones personalizadas.</p>
        </div>
    </aside>
</div>
<script src="/static/camera.js" defer></script>"#,
        camera_icon = Icon::Camera.svg("icon-lg text-primary"),
        start_class = button_class(ButtonVariant::Gradient, ButtonSize::Lg, ""),
        loader = Icon::Loader.svg("icon-xl spin"),
        outline = icon_lg(ButtonVariant::Outline),
        gradient = icon_lg(ButtonVariant::Gradient),
        x = Icon::X.svg("icon-md"),
        shoot = Icon::Camera.svg("icon-md"),
        retake = Icon::RotateCcw.svg("icon-md"),
        check = Icon::Check.svg("icon-md"),
    )
}
