//! Static knowledge base of pharmaceutical societies
//!
//! Every society that can be added to a report is described here by a fixed
//! attribute record. The table is compiled into the binary and never changes
//! at runtime, so it is shared read-only by every session.

/// Labels of the eight free-text attributes, in report column order
pub const DESCRIPTIVE_FIELDS: [&str; 8] = [
    "Community Sites",
    "Influential on Policy",
    "Engagement with Leadership",
    "Clinical Trial Recruitment",
    "Engagement with Payors",
    "Area Experts on Board",
    "Therapeutic Research Collaborations",
    "Top Experts on Board",
];

/// Fixed attribute record for one society
///
/// Records are `'static` and immutable. The society name is the unique key.
#[derive(Debug, PartialEq, Eq)]
pub struct OrganizationRecord {
    /// Society name (unique key)
    pub name: &'static str,
    /// Reported membership size
    pub membership_count: u32,
    /// Whether the society encompasses community sites
    pub community_sites: &'static str,
    /// Influence on state or local policy
    pub influential_on_policy: &'static str,
    /// Engagement opportunities with leadership
    pub engagement_with_leadership: &'static str,
    /// Support for clinical trial recruitment
    pub clinical_trial_recruitment: &'static str,
    /// Engagement opportunities with payors
    pub engagement_with_payors: &'static str,
    /// Area experts on the board
    pub area_experts_on_board: &'static str,
    /// Involvement in therapeutic research collaborations
    pub therapeutic_research_collaborations: &'static str,
    /// Top therapeutic area experts on the board
    pub top_experts_on_board: &'static str,
    /// Region label (usually a US state)
    pub region: &'static str,
}

impl OrganizationRecord {
    /// Pairs each descriptive label with this record's value
    ///
    /// # Examples
    ///
    /// ```
    /// use societyreport::knowledge::{lookup, DESCRIPTIVE_FIELDS};
    ///
    /// let record = lookup("IOWA Oncology Society").unwrap();
    /// let fields = record.descriptive_fields();
    /// assert_eq!(fields[0].0, DESCRIPTIVE_FIELDS[0]);
    /// ```
    pub fn descriptive_fields(&self) -> [(&'static str, &'static str); 8] {
        [
            (DESCRIPTIVE_FIELDS[0], self.community_sites),
            (DESCRIPTIVE_FIELDS[1], self.influential_on_policy),
            (DESCRIPTIVE_FIELDS[2], self.engagement_with_leadership),
            (DESCRIPTIVE_FIELDS[3], self.clinical_trial_recruitment),
            (DESCRIPTIVE_FIELDS[4], self.engagement_with_payors),
            (DESCRIPTIVE_FIELDS[5], self.area_experts_on_board),
            (DESCRIPTIVE_FIELDS[6], self.therapeutic_research_collaborations),
            (DESCRIPTIVE_FIELDS[7], self.top_experts_on_board),
        ]
    }
}

/// All known societies, in the order they are offered for selection
pub static KNOWLEDGE_BASE: &[OrganizationRecord] = &[
    OrganizationRecord {
        name: "FLASCO (Florida Society of Clinical Oncology)",
        membership_count: 4100,
        community_sites: "Yes, FLASCO does encompasses community sites. FLASCO primarily focuses on academic and institutional settings for oncology practices.",
        influential_on_policy: "No, FLASCO primarily focuses on education and advocacy within the field of clinical oncology, rather than having a direct influence on state or local policy.",
        engagement_with_leadership: "Yes, FLASCO provides engagement opportunity with leadership. FLASCO offers various leadership development programs, opportunities to interact with leaders in the field, and chances to participate in decision-making processes within the organization.",
        clinical_trial_recruitment: "Yes, FLASCO provides support for clinical trial recruitment.",
        engagement_with_payors: "Yes, FLASCO does provides engagement opportunities with payors. FLASCO primarily focuses on oncologists and cancer care in Florida.",
        area_experts_on_board: "Yes, FLASCO includes area experts on its board. The board primarily consists of oncologists, pharmacists, and other professionals in the field of oncology.",
        therapeutic_research_collaborations: "Yes, FLASCO is involved in therapeutic research collaborations. FLASCO regularly partners with pharmaceutical companies and research institutions to conduct clinical trials and research studies aimed at advancing cancer treatment.",
        top_experts_on_board: "Yes, FLASCO includes top therapeutic area experts on its board. FLASCO's mission is to improve the quality of care for oncology patients in Florida, and having top experts on the board helps to ensure that the best practices and advancements in the field are being implemented.",
        region: "Florida",
    },
    OrganizationRecord {
        name: "GASCO (Georgia Society of Clinical Oncology)",
        membership_count: 1900,
        community_sites: "Yes, GASCO actively engages with community oncology sites across Georgia to ensure the dissemination of best practices and resources to healthcare providers statewide.",
        influential_on_policy: "Yes, GASCO collaborates with state and local policymakers to influence healthcare policies that benefit oncology care and cancer patients in Georgia.",
        engagement_with_leadership: "Yes, GASCO provides engagement opportunity with leadership through various conferences, events, and committees that allow members to interact and collaborate with leaders in the field of clinical oncology.",
        clinical_trial_recruitment: "Yes, GASCO has established partnerships with research institutions to promote clinical trial awareness and streamline the recruitment process for oncology patients within Georgia.",
        engagement_with_payors: "No, GASCO does not provide engagement opportunities with payors. GASCO's primary focus is on clinical oncology and supporting oncology professionals, rather than engaging with payors.",
        area_experts_on_board: "Yes, GASCO includes area experts on its board, as it is a society of clinical oncologists in Georgia who would have expertise in the field.",
        therapeutic_research_collaborations: "Yes, GASCO is involved in therapeutic research collaborations. The organization collaborates with academic institutions, pharmaceutical companies, and other healthcare organizations to advance cancer care through research efforts.",
        top_experts_on_board: "No, the GASCO board does not include top therapeutic area experts. GASCO is a professional organization for oncology professionals in Georgia, but it does not specifically focus on therapeutic area experts on its board.",
        region: "Georgia",
    },
    OrganizationRecord {
        name: "IOS (Indiana Oncology Society)",
        membership_count: 800,
        community_sites: "Yes, IOS encompasses community sites. There are community oncology practices included in the Indiana Oncology Society.",
        influential_on_policy: "No, IOS is primarily focused on education and collaboration among oncology professionals in Indiana, and does not have a direct impact on state or local policy.",
        engagement_with_leadership: "Yes, IOS provides opportunities for engagement with leadership, IOS organizes events, conferences, and meetings that allow members to interact and engage with leaders in the oncology field.",
        clinical_trial_recruitment: "No, IOS does not provide support for clinical trial recruitment. IOS focuses on education, advocacy, and networking for oncology professionals in Indiana.",
        engagement_with_payors: "No, IOS does not provide engagement opportunities with payors, as it is focused on oncology-related activities",
        area_experts_on_board: "Yes, The Indiana Oncology Society includes area experts on its board to ensure that the organization has access to a diverse range of expertise and perspectives in the field of oncology.",
        therapeutic_research_collaborations: "Yes, IOS is involved in therapeutic research collaborations. IOS regularly collaborates with various research organizations and institutions to advance cancer treatment methods and options.",
        top_experts_on_board: "No, IOS does not include top therapeutic area experts on its board. IOS is a state-level organization for oncology professionals in Indiana and may not have the same level of expertise as other national organizations.",
        region: "Indiana",
    },
    OrganizationRecord {
        name: "MOASC (Medical Oncology Association of Southern California)",
        membership_count: 600,
        community_sites: "Yes, MOASC encompasses community sites as it represents medical oncologists in Southern California, including those practicing in community settings.",
        influential_on_policy: "No, the organization focuses on education and networking for medical professionals in Southern California and does not have a primary focus on policy advocacy.",
        engagement_with_leadership: "Yes, MOASC provides engagement opportunities with leadership through various events, conferences, and programs where members can interact with and learn from leaders in the field of medical oncology.",
        clinical_trial_recruitment: "No, MOASC does not provide support for clinical trial recruitment. , MOASC primarily focuses on providing education and networking opportunities for medical oncology professionals in Southern California.",
        engagement_with_payors: "No, MOASC does not provide engagement opportunities with payors. This organization primarily focuses on providing education, resources, and support for medical oncologists in Southern California.",
        area_experts_on_board: "Yes, , MOASC includes area experts on its board.",
        therapeutic_research_collaborations: "Yes, MOASC is involved in therapeutic research collaborations, as they work with various partners to advance cancer treatments.",
        top_experts_on_board: "Yes, MOASC includes top therapeutic area experts on its board., The organization consists of medical oncologists and hematologists who specialize in various areas of cancer treatment.",
        region: "California",
    },
    OrganizationRecord {
        name: "IOWA Oncology Society",
        membership_count: 2200,
        community_sites: "Yes, The IOWA Oncology Society focuses on community sites. Their main focus is on the community sites.",
        influential_on_policy: "No, lack of public information on direct influence on policy.",
        engagement_with_leadership: "Yes, The IOWA Oncology Society provides engagement opportunities with leadership through networking events, leadership development programs, and participation in committees and task forces.",
        clinical_trial_recruitment: "Yes, IOWA Oncology Society provides support for clinical trial recruitment.",
        engagement_with_payors: "No, The IOWA Oncology Society does not provide engagement opportunities with payors. The organization primarily focuses on professional development and support for oncology professionals in Iowa.",
        area_experts_on_board: "Yes, The IOWA Oncology Society includes area experts on its board because they are specialists in their field who provide expertise and guidance on cancer treatment and research.",
        therapeutic_research_collaborations: "Yes, this organization is involved in therapeutic research collaborations. Iowa Oncology Society actively collaborates with industry partners and academic institutions to advance research in the field of oncology.",
        top_experts_on_board: "Yes, the IOWA Oncology Society includes top therapeutic area experts on its board. Members are typically oncologists and other healthcare professionals with expertise in cancer treatment.",
        region: "Iowa",
    },
];

/// Look up a society record by its exact name
///
/// # Examples
///
/// ```
/// use societyreport::knowledge::lookup;
///
/// let record = lookup("GASCO (Georgia Society of Clinical Oncology)").unwrap();
/// assert_eq!(record.membership_count, 1900);
/// assert!(lookup("Unknown Society").is_none());
/// ```
pub fn lookup(name: &str) -> Option<&'static OrganizationRecord> {
    KNOWLEDGE_BASE.iter().find(|record| record.name == name)
}

/// Names of every known society in offering order
pub fn organization_names() -> impl Iterator<Item = &'static str> {
    KNOWLEDGE_BASE.iter().map(|record| record.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_knowledge_base_has_five_societies() {
        assert_eq!(KNOWLEDGE_BASE.len(), 5);
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<&str> = organization_names().collect();
        assert_eq!(names.len(), KNOWLEDGE_BASE.len());
    }

    #[test]
    fn test_lookup_known_society() {
        let record = lookup("FLASCO (Florida Society of Clinical Oncology)").unwrap();
        assert_eq!(record.membership_count, 4100);
        assert_eq!(record.region, "Florida");
    }

    #[test]
    fn test_lookup_is_exact_match() {
        assert!(lookup("flasco (florida society of clinical oncology)").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_descriptive_fields_follow_label_order() {
        let record = lookup("MOASC (Medical Oncology Association of Southern California)").unwrap();
        let fields = record.descriptive_fields();
        for (idx, (label, value)) in fields.iter().enumerate() {
            assert_eq!(*label, DESCRIPTIVE_FIELDS[idx]);
            assert!(!value.is_empty());
        }
        assert_eq!(fields[7].1, record.top_experts_on_board);
    }

    #[test]
    fn test_organization_names_preserve_offering_order() {
        let names: Vec<&str> = organization_names().collect();
        assert_eq!(names[0], "FLASCO (Florida Society of Clinical Oncology)");
        assert_eq!(names[4], "IOWA Oncology Society");
    }
}
