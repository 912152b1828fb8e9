//! Built-in marker kinds.
//!
//! Families of related kinds (resource injection, listeners, threading,
//! lifecycle hooks, REST methods) are enums so one validator and one
//! processor type can serve every member of the family.

use tagsmith_core::{MarkerKind, ResourceType, simple_name};

pub const ENHANCED_COMPONENT: MarkerKind = MarkerKind::from_static("enhanced-component");
pub const SHARED_PREF: MarkerKind = MarkerKind::from_static("shared-pref");
pub const BINDS_VIEW: MarkerKind = MarkerKind::from_static("binds-view");
pub const EXTRA: MarkerKind = MarkerKind::from_static("extra");
pub const SYSTEM_SERVICE: MarkerKind = MarkerKind::from_static("system-service");
pub const APPLICATION: MarkerKind = MarkerKind::from_static("application");
pub const TRANSACTIONAL: MarkerKind = MarkerKind::from_static("transactional");
pub const REST: MarkerKind = MarkerKind::from_static("rest");
pub const FROM_HTML: MarkerKind = MarkerKind::from_static("from-html");
pub const PREF: MarkerKind = MarkerKind::from_static("pref");
pub const OPTIONS_MENU: MarkerKind = MarkerKind::from_static("options-menu");
pub const OPTIONS_ITEM: MarkerKind = MarkerKind::from_static("options-item");

/// Handler parameter slot accepting any type, filled with the adapter item.
pub(crate) const ANY_ITEM: &str = "*";

/// Check a host type string against a qualified type, accepting the simple name.
pub(crate) fn type_matches(actual: &str, qualified: &str) -> bool {
    actual == qualified || actual == simple_name(qualified)
}

/// Resource injection markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    String,
    Color,
    Dimen,
    Bool,
    Integer,
    Anim,
    Drawable,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 7] = [
        Self::String,
        Self::Color,
        Self::Dimen,
        Self::Bool,
        Self::Integer,
        Self::Anim,
        Self::Drawable,
    ];

    pub fn marker(&self) -> MarkerKind {
        MarkerKind::from_static(match self {
            Self::String => "string-res",
            Self::Color => "color-res",
            Self::Dimen => "dimen-res",
            Self::Bool => "bool-res",
            Self::Integer => "integer-res",
            Self::Anim => "anim-res",
            Self::Drawable => "drawable-res",
        })
    }

    pub fn resource_type(&self) -> ResourceType {
        match self {
            Self::String => ResourceType::String,
            Self::Color => ResourceType::Color,
            Self::Dimen => ResourceType::Dimen,
            Self::Bool => ResourceType::Bool,
            Self::Integer => ResourceType::Integer,
            Self::Anim => ResourceType::Anim,
            Self::Drawable => ResourceType::Drawable,
        }
    }

    /// Field types this kind can be injected into.
    pub fn accepted_types(&self) -> &'static [&'static str] {
        match self {
            Self::String => &["java.lang.String", "java.lang.CharSequence"],
            Self::Color | Self::Integer => &["int", "java.lang.Integer"],
            Self::Dimen => &["float", "int", "java.lang.Float", "java.lang.Integer"],
            Self::Bool => &["boolean", "java.lang.Boolean"],
            Self::Anim => &["android.view.animation.Animation"],
            Self::Drawable => &["android.graphics.drawable.Drawable"],
        }
    }

    pub fn accepts(&self, field_type: &str) -> bool {
        self.accepted_types()
            .iter()
            .any(|accepted| type_matches(field_type, accepted))
    }

    /// `Resources` accessor loading a value of this kind into `field_type`.
    pub fn accessor(&self, field_type: &str) -> &'static str {
        match self {
            Self::String if type_matches(field_type, "java.lang.CharSequence") => "getText",
            Self::String => "getString",
            Self::Color => "getColor",
            Self::Dimen if is_float(field_type) => "getDimension",
            Self::Dimen => "getDimensionPixelSize",
            Self::Bool => "getBoolean",
            Self::Integer => "getInteger",
            Self::Anim => "loadAnimation",
            Self::Drawable => "getDrawable",
        }
    }
}

fn is_float(ty: &str) -> bool {
    type_matches(ty, "float") || type_matches(ty, "java.lang.Float")
}

/// View listener markers.
///
/// The item kinds are set on an `AdapterView` and report the position of
/// the item the user acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Click,
    LongClick,
    Touch,
    ItemClick,
    ItemLongClick,
    ItemSelected,
}

impl ListenerKind {
    pub const ALL: [ListenerKind; 6] = [
        Self::Click,
        Self::LongClick,
        Self::Touch,
        Self::ItemClick,
        Self::ItemLongClick,
        Self::ItemSelected,
    ];

    pub fn marker(&self) -> MarkerKind {
        MarkerKind::from_static(match self {
            Self::Click => "on-click",
            Self::LongClick => "on-long-click",
            Self::Touch => "on-touch",
            Self::ItemClick => "on-item-click",
            Self::ItemLongClick => "on-item-long-click",
            Self::ItemSelected => "on-item-selected",
        })
    }

    /// Method name suffix stripped to derive the default view id.
    pub fn method_suffix(&self) -> &'static str {
        match self {
            Self::Click => "Clicked",
            Self::LongClick => "LongClicked",
            Self::Touch => "Touched",
            Self::ItemClick => "ItemClicked",
            Self::ItemLongClick => "ItemLongClicked",
            Self::ItemSelected => "ItemSelected",
        }
    }

    /// Whether the listener is set on an `AdapterView`.
    pub fn on_adapter_view(&self) -> bool {
        matches!(
            self,
            Self::ItemClick | Self::ItemLongClick | Self::ItemSelected
        )
    }

    /// Default view id for a handler method (`saveClicked` -> `save`).
    pub fn default_id<'a>(&self, method: &'a str) -> &'a str {
        match method.strip_suffix(self.method_suffix()) {
            Some(id) if !id.is_empty() => id,
            _ => method,
        }
    }

    pub fn interface(&self) -> &'static str {
        match self {
            Self::Click => "android.view.View.OnClickListener",
            Self::LongClick => "android.view.View.OnLongClickListener",
            Self::Touch => "android.view.View.OnTouchListener",
            Self::ItemClick => "android.widget.AdapterView.OnItemClickListener",
            Self::ItemLongClick => "android.widget.AdapterView.OnItemLongClickListener",
            Self::ItemSelected => "android.widget.AdapterView.OnItemSelectedListener",
        }
    }

    pub fn setter(&self) -> &'static str {
        match self {
            Self::Click => "setOnClickListener",
            Self::LongClick => "setOnLongClickListener",
            Self::Touch => "setOnTouchListener",
            Self::ItemClick => "setOnItemClickListener",
            Self::ItemLongClick => "setOnItemLongClickListener",
            Self::ItemSelected => "setOnItemSelectedListener",
        }
    }

    pub fn callback(&self) -> &'static str {
        match self {
            Self::Click => "onClick",
            Self::LongClick => "onLongClick",
            Self::Touch => "onTouch",
            Self::ItemClick => "onItemClick",
            Self::ItemLongClick => "onItemLongClick",
            Self::ItemSelected => "onItemSelected",
        }
    }

    /// Whether the listener callback returns `boolean`.
    pub fn returns_boolean(&self) -> bool {
        matches!(self, Self::LongClick | Self::Touch | Self::ItemLongClick)
    }

    /// Parameter lists a handler method may declare. [`ANY_ITEM`] matches
    /// any type.
    pub fn handler_shapes(&self) -> &'static [&'static [&'static str]] {
        match self {
            Self::Click | Self::LongClick => &[&[], &["android.view.View"]],
            Self::Touch => &[
                &["android.view.MotionEvent"],
                &["android.view.MotionEvent", "android.view.View"],
            ],
            Self::ItemClick | Self::ItemLongClick => &[&[], &[ANY_ITEM]],
            Self::ItemSelected => &[&["boolean"], &["boolean", ANY_ITEM]],
        }
    }
}

/// Threading markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThreadKind {
    Ui,
    Background,
}

impl ThreadKind {
    pub const ALL: [ThreadKind; 2] = [Self::Ui, Self::Background];

    pub fn marker(&self) -> MarkerKind {
        MarkerKind::from_static(match self {
            Self::Ui => "runs-on-ui-thread",
            Self::Background => "runs-in-background",
        })
    }

    /// The other threading marker, which cannot be combined with this one.
    pub fn opposite(&self) -> ThreadKind {
        match self {
            Self::Ui => Self::Background,
            Self::Background => Self::Ui,
        }
    }
}

/// Lifecycle hook markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleHook {
    BeforeCreate,
    AfterViews,
}

impl LifecycleHook {
    pub const ALL: [LifecycleHook; 2] = [Self::BeforeCreate, Self::AfterViews];

    pub fn marker(&self) -> MarkerKind {
        MarkerKind::from_static(match self {
            Self::BeforeCreate => "before-create",
            Self::AfterViews => "after-views",
        })
    }
}

/// REST method markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 6] = [
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Delete,
        Self::Head,
        Self::Options,
    ];

    pub fn marker(&self) -> MarkerKind {
        MarkerKind::from_static(match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
            Self::Head => "head",
            Self::Options => "options",
        })
    }

    /// The only return types the method may declare, qualified name first.
    /// Empty when any type is allowed.
    pub fn response_types(&self) -> &'static [&'static str] {
        match self {
            Self::Head => &["org.springframework.http.HttpHeaders", "HttpHeaders"],
            Self::Options => &[
                "java.util.Set<org.springframework.http.HttpMethod>",
                "Set<HttpMethod>",
            ],
            _ => &[],
        }
    }

    /// Whether a request body parameter is allowed.
    pub fn takes_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }

    /// Whether the method must be declared `void`.
    pub fn requires_void(&self) -> bool {
        matches!(self, Self::Put | Self::Delete)
    }
}

/// `{placeholder}` names in a URL template, in order.
pub(crate) fn url_placeholders(url: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = url;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                names.push(&after[..end]);
                rest = &after[end + 1..];
            }
            None => break,
        }
    }
    names
}
