//! Static per-entity import schemas
//!
//! Every entity kind has one [`EntitySchema`]: an ordered field list where
//! each field carries its constraints (required, numeric) and the header
//! spellings accepted for it. Spreadsheets kept by the sales team label
//! columns in Japanese or Chinese, so those labels are accepted as aliases
//! next to the canonical snake_case names.

use crate::core::identity::EntityKind;

/// Value type of a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, stored trimmed
    Text,
    /// Must parse as a finite number
    Number,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
        }
    }
}

/// One column of an entity schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Canonical field name; also the export header
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Alternative header spellings accepted on import
    pub aliases: &'static [&'static str],
}

impl FieldSpec {
    const fn text(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
            required: false,
            aliases,
        }
    }

    const fn number(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Self {
            name,
            kind: FieldKind::Number,
            required: false,
            aliases,
        }
    }

    const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.kind == FieldKind::Number
    }

    /// Whether a (trimmed) header cell names this field
    pub fn matches_header(&self, header: &str) -> bool {
        let header = header.trim();
        self.name.eq_ignore_ascii_case(header)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(header))
    }
}

/// Declarative schema for one entity kind
#[derive(Debug)]
pub struct EntitySchema {
    pub kind: EntityKind,
    pub title: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldSpec],
    /// Example row used by `import --template`, aligned with `fields`
    pub example: &'static [&'static str],
}

impl EntitySchema {
    /// Look up a field by canonical name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }

    /// Canonical headers in schema order
    pub fn headers(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }
}

static LEAD_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("lead_number", &["引合番号"]).required(),
    FieldSpec::text("owner", &["担当"]),
    FieldSpec::text("region", &["地域"]),
    FieldSpec::text("agent", &["代理"]),
    FieldSpec::text("model", &["機種"]),
    FieldSpec::text("quantity", &["台数"]),
    FieldSpec::text("customer", &["顧客情報"]),
    FieldSpec::text("opened", &["案件発生年月"]),
    FieldSpec::text("visit_method", &["访问方式"]),
    FieldSpec::text("visit_count", &["訪問回数"]),
    FieldSpec::text("confidence", &["確度"]),
    FieldSpec::text("confidence_change", &["確度変更"]),
    FieldSpec::text("confidence_change_reason", &["確度変更理由"]),
    FieldSpec::text("ship_window", &["出荷可能時期"]),
    FieldSpec::text("outcome", &["最終結果"]),
    FieldSpec::text("shipped_on", &["出荷日(実際）", "出荷日(実際)"]),
    FieldSpec::text("detail_notes", &["備考①引合詳細、補充内容"]),
    FieldSpec::text("history_notes", &["備考②引合状況変化記録等"]),
    FieldSpec::text("extra_notes", &["備考③"]),
];

static CONTRACT_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("owner", &["担当"]),
    FieldSpec::text("model", &["機種"]),
    FieldSpec::text("category", &["区分"]),
    FieldSpec::text("machine_number", &["機号"]),
    FieldSpec::text("contract_date", &["契約日"]),
    FieldSpec::text("agent_name", &["代理名称"]),
    FieldSpec::text("contract_status", &["契約状態"]),
    FieldSpec::text("contract_number", &["契約書NO", "契約書No"]).required(),
    FieldSpec::text("shipping_order", &["出荷指示書№"]),
    FieldSpec::text("dated", &["契約日付"]),
    FieldSpec::number("unit_price", &["単価"]),
    FieldSpec::number("quantity", &["台数"]),
    FieldSpec::text("installment_term", &["割賦時間"]),
    FieldSpec::text("notes_1", &["備考①"]),
    FieldSpec::text("notes_2", &["備考②"]),
];

static AGENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("sales_owner", &["SS担当"]),
    FieldSpec::text("territory", &["代理区域"]),
    FieldSpec::text("agent_name", &["代理商"]).required(),
    FieldSpec::text("contact_person", &["联系人"]),
    FieldSpec::text("phone", &["电话"]),
    FieldSpec::text("address", &["公司地址"]),
    FieldSpec::text("contract_date", &["合同日期"]),
    FieldSpec::text("status", &["代理状态"]),
    FieldSpec::text("notes", &["备考"]),
];

static PRODUCT_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("name", &["機種"]).required(),
    FieldSpec::text("category", &["区分"]),
    FieldSpec::number("agent_price", &["代理価格"]),
    FieldSpec::number("price", &["仕切り価格"]).required(),
    FieldSpec::text("options", &["オプション"]),
    FieldSpec::text("notes", &["備考"]),
];

static CUSTOMER_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("name", &[]).required(),
    FieldSpec::text("contact", &[]),
];

static LEAD: EntitySchema = EntitySchema {
    kind: EntityKind::Lead,
    title: "Lead",
    description: "Sales inquiry tracked from first contact to shipment",
    fields: LEAD_FIELDS,
    example: &[
        "L-2024-001",
        "Tanaka",
        "East",
        "Acme Trading",
        "X-200",
        "2",
        "Acme Corp, Osaka",
        "2024-03",
        "onsite",
        "1",
        "B",
        "",
        "",
        "2024-Q3",
        "",
        "",
        "Needs quote, follow up",
        "",
        "",
    ],
};

static CONTRACT: EntitySchema = EntitySchema {
    kind: EntityKind::Contract,
    title: "Contract",
    description: "Signed sales contract",
    fields: CONTRACT_FIELDS,
    example: &[
        "Tanaka",
        "X-200",
        "new",
        "SN-1001",
        "2024-04-01",
        "Acme Trading",
        "active",
        "C-2024-017",
        "SO-88",
        "2024-04-02",
        "125000",
        "2",
        "12 months",
        "",
        "",
    ],
};

static AGENT: EntitySchema = EntitySchema {
    kind: EntityKind::Agent,
    title: "Agent",
    description: "Sales agent or distributor",
    fields: AGENT_FIELDS,
    example: &[
        "Tanaka",
        "East",
        "Acme Trading",
        "Li Wei",
        "+86-21-5555-0100",
        "88 Harbor Rd, Shanghai",
        "2023-01-15",
        "active",
        "",
    ],
};

static PRODUCT: EntitySchema = EntitySchema {
    kind: EntityKind::Product,
    title: "Product",
    description: "Sellable product with agent and list pricing",
    fields: PRODUCT_FIELDS,
    example: &["X-200", "press", "95000", "125000", "cooling, guard", ""],
};

static CUSTOMER: EntitySchema = EntitySchema {
    kind: EntityKind::Customer,
    title: "Customer",
    description: "Customer contact",
    fields: CUSTOMER_FIELDS,
    example: &["Acme", "555-1000"],
};

/// Lookup of the static schema for each entity kind
pub struct SchemaRegistry;

impl SchemaRegistry {
    pub fn get(kind: EntityKind) -> &'static EntitySchema {
        match kind {
            EntityKind::Lead => &LEAD,
            EntityKind::Contract => &CONTRACT,
            EntityKind::Agent => &AGENT,
            EntityKind::Product => &PRODUCT,
            EntityKind::Customer => &CUSTOMER,
        }
    }

    pub fn all() -> impl Iterator<Item = &'static EntitySchema> {
        EntityKind::all().iter().map(|kind| Self::get(*kind))
    }
}

impl EntityKind {
    /// Import schema for this kind
    pub fn schema(&self) -> &'static EntitySchema {
        SchemaRegistry::get(*self)
    }
}
